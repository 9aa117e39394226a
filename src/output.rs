//! Output formatting for CLI display.
//!
//! Provides the [`PrettyPrint`] trait for human-readable output
//! as an alternative to JSON serialization.

use chrono::{DateTime, Utc};

use crate::{Attachment, ControlLibrary, ControlLibraryDelete, Profile, Scan, Settings};

/// Trait for human-readable key-value output.
///
/// Implemented by entity types to provide formatted output
/// suitable for terminal display when `--json` is not specified.
pub trait PrettyPrint {
    /// Returns a formatted string for terminal display.
    fn pretty_print(&self) -> String;
}

fn header(kind: &str, id: Option<&str>) -> Vec<String> {
    let title = format!("{}: {}", kind, id.unwrap_or("-"));
    let divider = "─".repeat(title.chars().count().max(30));
    vec![title, divider]
}

fn push_str(lines: &mut Vec<String>, label: &str, value: Option<&str>) {
    if let Some(value) = value {
        lines.push(format!("{:<16}{}", format!("{}:", label), value));
    }
}

fn push_time(lines: &mut Vec<String>, label: &str, value: Option<&DateTime<Utc>>) {
    if let Some(value) = value {
        let formatted = value.format("%Y-%m-%d %H:%M:%S UTC").to_string();
        push_str(lines, label, Some(&formatted));
    }
}

impl PrettyPrint for ControlLibrary {
    fn pretty_print(&self) -> String {
        let mut lines = header("Control Library", self.id.as_deref());

        push_str(&mut lines, "Name", self.control_library_name.as_deref());
        push_str(&mut lines, "Type", self.control_library_type.as_deref());
        push_str(&mut lines, "Version", self.control_library_version.as_deref());

        if let Some(latest) = self.latest {
            push_str(&mut lines, "Latest", Some(if latest { "yes" } else { "no" }));
        }

        if let Some(count) = self.controls_count {
            lines.push(format!("Controls:       {}", count));
        }

        push_str(&mut lines, "Created By", self.created_by.as_deref());
        push_time(&mut lines, "Created", self.created_on.as_ref());
        push_time(&mut lines, "Updated", self.updated_on.as_ref());

        lines.join("\n")
    }
}

impl PrettyPrint for ControlLibraryDelete {
    fn pretty_print(&self) -> String {
        format!("Deleted: {}", self.deleted.as_deref().unwrap_or("-"))
    }
}

impl PrettyPrint for Profile {
    fn pretty_print(&self) -> String {
        let mut lines = header("Profile", self.id.as_deref());

        push_str(&mut lines, "Name", self.profile_name.as_deref());
        push_str(&mut lines, "Type", self.profile_type.as_deref());
        push_str(&mut lines, "Version", self.profile_version.as_deref());
        push_str(&mut lines, "Instance", self.instance_id.as_deref());

        if let Some(count) = self.controls_count {
            lines.push(format!("Controls:       {}", count));
        }

        if let Some(count) = self.attachments_count {
            lines.push(format!("Attachments:    {}", count));
        }

        push_time(&mut lines, "Updated", self.updated_on.as_ref());

        lines.join("\n")
    }
}

impl PrettyPrint for Attachment {
    fn pretty_print(&self) -> String {
        let mut lines = header("Attachment", self.id.as_deref());

        push_str(&mut lines, "Name", self.name.as_deref());
        push_str(&mut lines, "Profile", self.profile_id.as_deref());
        push_str(&mut lines, "Status", self.status.as_deref());
        push_str(&mut lines, "Schedule", self.schedule.as_deref());

        // One line per scope environment
        for scope in self.scope.iter().flatten() {
            let properties = scope
                .properties
                .iter()
                .flatten()
                .filter_map(|p| {
                    let name = p.name.as_deref()?;
                    let value = match p.value.as_ref()? {
                        serde_json::Value::String(s) => s.clone(),
                        other => other.to_string(),
                    };
                    Some(format!("{}={}", name, value))
                })
                .collect::<Vec<_>>()
                .join(", ");
            lines.push(format!(
                "Scope:          {} [{}]",
                scope.environment.as_deref().unwrap_or("-"),
                properties
            ));
        }

        if let Some(ref last) = self.last_scan {
            push_str(&mut lines, "Last Scan", last.status.as_deref());
            push_time(&mut lines, "Last Scan Time", last.time.as_ref());
        }

        push_time(&mut lines, "Next Scan", self.next_scan_time.as_ref());

        lines.join("\n")
    }
}

impl PrettyPrint for Scan {
    fn pretty_print(&self) -> String {
        let mut lines = header("Scan", self.id.as_deref());

        push_str(&mut lines, "Attachment", self.attachment_id.as_deref());
        push_str(&mut lines, "Status", self.status.as_deref());
        push_str(&mut lines, "Type", self.scan_type.as_deref());
        push_str(&mut lines, "Report", self.report_id.as_deref());
        push_time(&mut lines, "Last Scan", self.last_scan_time.as_ref());
        push_time(&mut lines, "Next Scan", self.next_scan_time.as_ref());

        lines.join("\n")
    }
}

impl PrettyPrint for Settings {
    fn pretty_print(&self) -> String {
        let mut lines = vec!["Settings".to_string(), "─".repeat(30)];

        match self.event_notifications {
            Some(ref en) => {
                push_str(&mut lines, "Notifications", en.instance_crn.as_deref());
                push_str(&mut lines, "Source", en.source_name.as_deref());
            }
            None => lines.push("Notifications:  not configured".to_string()),
        }

        match self.object_storage {
            Some(ref cos) => {
                push_str(&mut lines, "Storage", cos.instance_crn.as_deref());
                push_str(&mut lines, "Bucket", cos.bucket.as_deref());
                push_str(&mut lines, "Location", cos.bucket_location.as_deref());
            }
            None => lines.push("Storage:        not configured".to_string()),
        }

        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_control_library_pretty_print_format() {
        let library: ControlLibrary = serde_json::from_value(serde_json::json!({
            "id": "cl-123",
            "control_library_name": "IBM Cloud for Financial Services",
            "control_library_type": "predefined",
            "controls_count": 565,
            "latest": true
        }))
        .unwrap();

        let output = library.pretty_print();
        assert!(output.starts_with("Control Library: cl-123"));
        assert!(output.contains("Name:           IBM Cloud for Financial Services"));
        assert!(output.contains("Controls:       565"));
        assert!(output.contains("Latest:         yes"));
    }

    #[test]
    fn test_control_library_delete_pretty_print() {
        let deleted = ControlLibraryDelete {
            deleted: Some("cl-9".to_string()),
        };
        assert_eq!(deleted.pretty_print(), "Deleted: cl-9");
        assert_eq!(ControlLibraryDelete::default().pretty_print(), "Deleted: -");
    }

    #[test]
    fn test_missing_fields_are_skipped() {
        let profile = Profile {
            id: Some("p-1".to_string()),
            ..Default::default()
        };

        let output = profile.pretty_print();
        assert!(output.starts_with("Profile: p-1"));
        assert!(!output.contains("Name:"));
        assert_eq!(output.lines().count(), 2);
    }

    #[test]
    fn test_attachment_scope_line() {
        let attachment: Attachment = serde_json::from_value(serde_json::json!({
            "id": "att-1",
            "status": "enabled",
            "scope": [{
                "environment": "ibm-cloud",
                "properties": [
                    {"name": "scope_id", "value": "acct-1"},
                    {"name": "scope_type", "value": "account"}
                ]
            }]
        }))
        .unwrap();

        let output = attachment.pretty_print();
        assert!(output.contains("Scope:          ibm-cloud [scope_id=acct-1, scope_type=account]"));
    }

    #[test]
    fn test_settings_not_configured() {
        let output = Settings::default().pretty_print();
        assert!(output.contains("Notifications:  not configured"));
        assert!(output.contains("Storage:        not configured"));
    }
}
