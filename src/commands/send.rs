//! Send command implementation
//!
//! Renders a notification and delivers it, or previews it in dry-run mode.

use crate::cli::args::{OutputFormat, SendArgs};
use crate::cli::output::{print_output, DeliveryReport, DryRunReport};
use crate::config::{Config, ConfigBuilder};
use crate::domain::NotificationKind;
use crate::error::{AppError, Result};
use crate::notify::http_deliverer;

/// Execute the send command
pub fn run_send(
    args: &SendArgs,
    config_path: Option<&str>,
    format: OutputFormat,
    dry_run: bool,
) -> Result<()> {
    // Reject unknown types before reading config or payload
    let kind: NotificationKind = args.kind.parse()?;
    let config = build_config(args, config_path)?;
    let deliverer = http_deliverer(&config, kind)?;

    if dry_run {
        let prepared = deliverer.prepare(&args.inputs, &args.params)?;
        let report = DryRunReport::new(
            deliverer.api_url(),
            prepared,
            deliverer.config().mention_text(),
        );
        print_output(&report, format)?;
        return Ok(());
    }

    let result = deliverer.deliver_payload(&args.inputs, &args.params)?;
    let success = result.success;
    let outcome = result.outcome.to_string();

    let report = DeliveryReport {
        kind: kind.to_string(),
        room_id: deliverer.config().room_id().to_string(),
        result,
    };
    print_output(&report, format)?;

    if success {
        Ok(())
    } else {
        Err(AppError::DeliveryFailed(outcome))
    }
}

fn build_config(args: &SendArgs, config_path: Option<&str>) -> Result<Config> {
    Ok(ConfigBuilder::new()
        .with_file(config_path)?
        .with_token(args.token.clone())
        .with_sender(args.user.clone())
        .with_room(args.room.clone())
        .with_notify(args.notify)
        .with_mention(args.mention_override())
        .with_template_dir(args.template_dir.clone())
        .with_api_url(args.api_url.clone())
        .with_timeout(args.timeout)
        .build())
}
