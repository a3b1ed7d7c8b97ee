//! Output formatting module
//!
//! This module handles printing an extraction result in the formats offered
//! by the `show` command.

use crate::{
    Result,
    extractor::Extraction,
    render::Dot,
    state_machine::AnalysisReport,
};
use serde_json::json;

/// Output the graph description
pub fn output_dot(w: &mut impl std::io::Write, extraction: &Extraction, name: &str) -> Result<()> {
    write!(w, "{}", Dot::new(&extraction.graph, name))?;
    Ok(())
}

/// Output the extraction as JSON
pub fn output_json(
    w: &mut impl std::io::Write,
    extraction: &Extraction,
    report: &AnalysisReport,
) -> Result<()> {
    let graph = &extraction.graph;
    let output = json!({
        "state_variable": extraction.state_variable,
        "stopped_early": extraction.stopped_early,
        "summary": report,
        "states": graph.sources().map(|state| {
            json!({
                "state": state,
                "transitions": graph.outgoing(state).iter().map(|t| {
                    json!({ "to": t.to_state, "line": t.line })
                }).collect::<Vec<_>>(),
            })
        }).collect::<Vec<_>>(),
        "diagnostics": extraction.diagnostics,
    });

    serde_json::to_writer_pretty(&mut *w, &output)?;
    writeln!(w)?; // Add trailing newline
    Ok(())
}

/// Output the extraction as a text table
pub fn output_table(
    w: &mut impl std::io::Write,
    extraction: &Extraction,
    report: &AnalysisReport,
) -> Result<()> {
    writeln!(w, "State Machine Extraction")?;
    writeln!(w, "{}", "=".repeat(60))?;
    writeln!(w)?;

    writeln!(w, "Summary:")?;
    writeln!(
        w,
        "  State Variable:   {}",
        extraction.state_variable.as_deref().unwrap_or("(none)")
    )?;
    writeln!(w, "  States:           {}", report.total_states)?;
    writeln!(w, "  Transitions:      {}", report.total_transitions)?;
    writeln!(w, "  Initial States:   {}", list_or_dash(&report.initial_states))?;
    writeln!(w, "  Terminal States:  {}", list_or_dash(&report.terminal_states))?;
    writeln!(w, "  Self Loops:       {}", list_or_dash(&report.self_loops))?;
    writeln!(w, "  Cycles:           {}", if report.has_cycles { "yes" } else { "no" })?;
    if extraction.stopped_early {
        writeln!(w, "  Stopped early at a second dispatch construct")?;
    }
    writeln!(w)?;

    if !extraction.graph.is_empty() {
        writeln!(w, "Transitions:")?;
        writeln!(w, "{:-<60}", "")?;
        writeln!(w, "{:<24} {:<24} {:>8}", "From", "To", "Line")?;
        writeln!(w, "{:-<60}", "")?;

        for transition in extraction.graph.transitions() {
            let from = if transition.is_orphan() {
                "(none)"
            } else {
                transition.from_state.as_str()
            };
            writeln!(
                w,
                "{:<24} {:<24} {:>8}",
                from, transition.to_state, transition.line
            )?;
        }
        writeln!(w)?;
    }

    if !extraction.diagnostics.is_empty() {
        writeln!(w, "Diagnostics:")?;
        for diagnostic in &extraction.diagnostics {
            writeln!(w, "  {}", diagnostic)?;
        }
        writeln!(w)?;
    }

    Ok(())
}

fn list_or_dash(items: &[String]) -> String {
    if items.is_empty() {
        "-".to_string()
    } else {
        items.join(", ")
    }
}
