//! Transcript export utilities.
//!
//! The landing-page widgets offer "save this conversation"; the engines
//! render the transcript to a self-contained HTML page or to JSON. Nothing
//! here is required for live operation.

use std::path::PathBuf;

use tracing::info;

use crate::error::ConciergeError;
use crate::transcript::{Speaker, TranscriptEntry};

// ---------------------------------------------------------------------------
// Session slug
// ---------------------------------------------------------------------------

/// Generate a human-readable slug for a session (e.g. "amber-relay-17").
pub fn session_slug(session_id: &str) -> String {
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    const ADJECTIVES: &[&str] = &[
        "amber", "cobalt", "silent", "rapid", "steady", "lucid", "prime", "vivid", "slate", "nova",
    ];
    const NOUNS: &[&str] = &[
        "relay", "vector", "signal", "kernel", "beacon", "circuit", "sensor", "module", "probe",
        "array",
    ];

    let mut h = DefaultHasher::new();
    session_id.hash(&mut h);
    let hash = h.finish();
    let adj = ADJECTIVES[(hash % ADJECTIVES.len() as u64) as usize];
    let noun = NOUNS[((hash >> 16) % NOUNS.len() as u64) as usize];
    format!("{}-{}-{}", adj, noun, hash % 100)
}

/// Serialize a transcript to pretty-printed JSON.
pub fn transcript_to_json(entries: &[TranscriptEntry]) -> Result<String, ConciergeError> {
    serde_json::to_string_pretty(entries)
        .map_err(|e| ConciergeError::Other(anyhow::Error::from(e)))
}

// ---------------------------------------------------------------------------
// HTML export
// ---------------------------------------------------------------------------

/// Writes transcripts to disk as standalone HTML pages.
pub struct TranscriptExporter {
    pub output_dir: PathBuf,
}

impl TranscriptExporter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// Render the transcript and write it under the output directory.
    /// Returns the path of the written file.
    pub async fn export_html(
        &self,
        session_id: &str,
        title: &str,
        entries: &[TranscriptEntry],
    ) -> Result<PathBuf, ConciergeError> {
        tokio::fs::create_dir_all(&self.output_dir).await?;
        let filename = format!(
            "{}-{}.html",
            session_slug(session_id),
            session_id_short(session_id)
        );
        let path = self.output_dir.join(&filename);

        let html = render_html(title, entries);
        tokio::fs::write(&path, &html).await?;
        info!(session_id, path = %path.display(), "Transcript exported");
        Ok(path)
    }
}

fn session_id_short(id: &str) -> &str {
    // Truncate on a char boundary; session ids are caller-supplied and not
    // guaranteed to be ASCII.
    match id.char_indices().nth(8) {
        Some((byte_index, _)) => &id[..byte_index],
        None => id,
    }
}

fn render_html(title: &str, entries: &[TranscriptEntry]) -> String {
    let body = entries
        .iter()
        .map(|e| {
            let class = match e.speaker {
                Speaker::Agent => "entry-agent",
                Speaker::User => "entry-user",
                Speaker::System => "entry-system",
            };
            format!(
                r#"<div class="entry {class}"><span class="speaker">{speaker}</span><span class="when">{when}</span><div class="text">{text}</div></div>"#,
                class = class,
                speaker = e.speaker,
                when = e.timestamp.to_rfc3339(),
                text = html_escape(&e.text),
            )
        })
        .collect::<String>();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<title>{title}</title>
<style>
body {{ font-family: ui-monospace, monospace; max-width: 720px; margin: 2rem auto; padding: 0 1rem; background: #030712; color: #d1d5db; }}
.entry {{ margin-bottom: 1rem; border-radius: 6px; padding: 0.75rem 1rem; }}
.entry-user {{ background: #111827; }}
.entry-agent {{ background: #0c1a2b; border-left: 3px solid #22d3ee; }}
.entry-system {{ background: #18181b; color: #71717a; font-style: italic; }}
.speaker {{ font-weight: 700; font-size: 0.7rem; text-transform: uppercase; color: #6b7280; margin-right: 0.5rem; }}
.when {{ font-size: 0.7rem; color: #4b5563; }}
.text {{ white-space: pre-wrap; line-height: 1.5; margin-top: 0.25rem; }}
</style>
</head>
<body>
<h1>{title}</h1>
{body}
</body>
</html>"#,
        title = html_escape(title),
        body = body,
    )
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transcript::Speaker;

    fn sample_transcript() -> Vec<TranscriptEntry> {
        vec![
            TranscriptEntry::now(Speaker::System, "Concierge online."),
            TranscriptEntry::now(Speaker::User, "cost <reduction>"),
            TranscriptEntry::now(Speaker::Agent, "What's your timeline?"),
        ]
    }

    #[test]
    fn test_short_id_truncates_on_char_boundary() {
        assert_eq!(session_id_short("abcdefghij"), "abcdefgh");
        assert_eq!(session_id_short("short"), "short");
        // Multi-byte chars before the cut must not panic the byte slice.
        assert_eq!(session_id_short("übersicht-42"), "übersich");
    }

    #[tokio::test]
    async fn test_export_accepts_non_ascii_session_id() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = TranscriptExporter::new(dir.path());
        let path = exporter
            .export_html("sitzungs-übersicht-123", "Intake", &sample_transcript())
            .await
            .unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_slug_is_deterministic() {
        assert_eq!(session_slug("abc"), session_slug("abc"));
        assert_ne!(session_slug("abc"), session_slug("abd"));
    }

    #[test]
    fn test_render_escapes_and_includes_entries() {
        let html = render_html("Intake", &sample_transcript());
        assert!(html.contains("Concierge online."));
        assert!(html.contains("cost &lt;reduction&gt;"));
        assert!(html.contains("What's your timeline?"));
        assert!(!html.contains("<reduction>"));
    }

    #[test]
    fn test_transcript_to_json_roundtrip() {
        let entries = sample_transcript();
        let json = transcript_to_json(&entries).unwrap();
        let parsed: Vec<TranscriptEntry> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, entries);
    }

    #[tokio::test]
    async fn test_export_html_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let exporter = TranscriptExporter::new(dir.path());
        let path = exporter
            .export_html("session-1234567890", "Intake", &sample_transcript())
            .await
            .unwrap();
        assert!(path.exists());
        let written = tokio::fs::read_to_string(&path).await.unwrap();
        assert!(written.contains("Intake"));
    }
}
