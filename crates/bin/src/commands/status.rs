//! Status command - prints the capsule as a visitor would see it right now.
//!
//! Read-only: an unpinned reveal target is reported but not written.

use timecapsule::{Clock, SystemClock, ViewModel};

use crate::backend::{open_capsule, store_label};
use crate::cli::StatusArgs;
use crate::output::{OutputFormat, format_table};

/// Run the status command
pub async fn run(args: &StatusArgs) -> Result<(), Box<dyn std::error::Error>> {
    let controller = open_capsule(&args.capsule).await?;
    let view = controller.preview_state(SystemClock.now()).await?;

    match OutputFormat::from_json_flag(args.json) {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&view)?),
        OutputFormat::Human => print!("{}", render_human(&view, &store_label(&args.capsule))),
    }
    Ok(())
}

fn render_human(view: &ViewModel, store: &str) -> String {
    let mut out = format!("Store: {store}\n");

    match view {
        ViewModel::Locked(locked) => {
            out.push_str(&format!(
                "Sealed until {} ({}/{} messages)\n",
                locked.target_display, locked.participant_count, locked.capacity
            ));
            let rows: Vec<Vec<String>> = locked
                .authors
                .iter()
                .enumerate()
                .map(|(i, author)| vec![(i + 1).to_string(), author.clone()])
                .collect();
            if !rows.is_empty() {
                out.push('\n');
                out.push_str(&format_table(&["#", "AUTHOR"], &rows));
            }
        }
        ViewModel::Open(open) => {
            out.push_str(&format!("Opened on {}\n", open.target_display));
            let rows: Vec<Vec<String>> = open
                .messages
                .iter()
                .enumerate()
                .map(|(i, msg)| {
                    vec![
                        (i + 1).to_string(),
                        msg.author.clone(),
                        msg.submitted_at_display(),
                        msg.body.clone(),
                    ]
                })
                .collect();
            if rows.is_empty() {
                out.push_str("No messages were left.\n");
            } else {
                out.push('\n');
                out.push_str(&format_table(&["#", "AUTHOR", "WRITTEN", "MESSAGE"], &rows));
            }
        }
    }
    out
}
