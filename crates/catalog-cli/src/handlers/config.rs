use crate::context::CliContext;
use crate::output;

pub fn handle(ctx: &CliContext) -> anyhow::Result<()> {
    let mut config = ctx.config.clone();
    if config.api.private_key.is_some() {
        config.api.private_key = Some("<redacted>".to_string());
    }
    output::output_success(serde_json::json!({
        "path": ctx.config_path.as_ref().map(|p| p.display().to_string()),
        "config": config,
    }))
}
