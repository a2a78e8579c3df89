use crate::pipeline::ImportCounters;

/// How the summary should be surfaced to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Success,
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub tone: Tone,
    pub message: String,
}

/// Pure formatting over the final counters; storage is never re-touched.
pub fn summarize(counters: &ImportCounters) -> Summary {
    let ImportCounters {
        success_count,
        duplicate_count,
        skipped_count,
        error_count,
    } = *counters;

    if success_count > 0 {
        let mut message = format!("{success_count} expenses imported successfully.");
        if skipped_count > 0 || error_count > 0 {
            message.push_str(&format!(" {skipped_count} skipped."));
            if error_count > 0 {
                message.push_str(&format!(" {error_count} failed due to errors."));
            }
        }
        Summary {
            tone: Tone::Success,
            message,
        }
    } else if duplicate_count > 0 {
        let mut message = "No new expenses imported. All were duplicates or skipped.".to_string();
        if error_count > 0 {
            message.push_str(&format!(" {error_count} failed due to errors."));
        }
        Summary {
            tone: Tone::Info,
            message,
        }
    } else {
        let mut message = "Failed to import expenses".to_string();
        if error_count > 0 {
            message.push_str(&format!(" ({error_count} errors encountered)"));
        }
        Summary {
            tone: Tone::Error,
            message,
        }
    }
}
