use crate::context::ExecutionContext;
use crate::output::print_json;
use crate::types::OutputFormat;
use anyhow::Result;
use callsnap_types::ArchivedOutput;

pub fn handle(
    ctx: &ExecutionContext,
    target: &str,
    function: &str,
    run_id: Option<String>,
) -> Result<()> {
    let run_id = run_id.unwrap_or_else(|| ctx.config().run_id_for_args::<&str>(&[]));
    let relative = format!("{}/{}/{}", target, function, run_id);

    let Some(output) = ctx.store().read_archived_output(&relative) else {
        anyhow::bail!(
            "No archived output for {}.{} in run '{}'",
            target,
            function,
            run_id
        );
    };

    match ctx.format {
        OutputFormat::Json => print_json(&output),
        OutputFormat::Plain => {
            match output {
                ArchivedOutput::Text(text) => println!("{}", text),
                ArchivedOutput::Structured(value) => {
                    println!("{}", serde_json::to_string_pretty(&value)?)
                }
            }
            Ok(())
        }
    }
}
