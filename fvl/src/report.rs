use colored::Colorize;
use ios_config_core::{MatchRecord, ScanOutcome};

/// Render one match as a single terminal line.
///
/// Exact matches are flagged with a red `!>` and printed in green.
pub fn render_record(record: &MatchRecord) -> String {
    let mut flags = String::new();
    if record.secondary {
        flags.push_str(" (SECNDR)");
    }
    if !record.status.is_up() {
        flags.push_str(" (DOWN)");
    }

    let line = format!(
        "Host: {} Iface: {}{} Vrf: {} IfaceIp: {} AclIn: {} AclOut: {}",
        record.hostname,
        record.interface,
        flags,
        record.vrf,
        record.prefix,
        record.acl_in,
        record.acl_out
    );

    if record.exact {
        format!("{} {}", "!>".red(), line.green())
    } else {
        line
    }
}

/// Render source matches, then destination matches under a header.
///
/// `destination` is the queried destination text, empty when none was given.
pub fn render_text(outcome: &ScanOutcome, source: &str, destination: &str) -> String {
    let mut out = Vec::new();
    append_records(&mut out, &outcome.source, source);
    if !destination.is_empty() {
        if !outcome.destination.is_empty() {
            out.push("Destination:".bold().to_string());
        }
        append_records(&mut out, &outcome.destination, destination);
    }
    out.join("\n")
}

fn append_records(out: &mut Vec<String>, records: &[MatchRecord], target: &str) {
    if records.is_empty() {
        out.push(format!("no matches for {target}"));
        return;
    }
    for record in records {
        out.push(render_record(record));
    }
}
