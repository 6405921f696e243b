use crate::context::ExecutionContext;
use crate::output::print_json;
use crate::types::OutputFormat;
use anyhow::Result;
use serde_json::json;

pub fn handle(ctx: &ExecutionContext, args: &[String]) -> Result<()> {
    let run_id = ctx.config().run_id_for_args(args);

    match ctx.format {
        OutputFormat::Json => print_json(&json!({ "runId": run_id })),
        OutputFormat::Plain => {
            println!("{}", run_id);
            Ok(())
        }
    }
}
