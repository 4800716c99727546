//! Update reporting.
//!
//! Every improving update is an observable event. The console reporter
//! prints the two-line report for each one; the line layouts are part of
//! the output contract, so each has its own formatter.

use crate::graph::Cost;

/// One improving update found by the relaxation pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relaxation {
    pub from: String,
    pub to: String,
    pub via: String,
    pub new_cost: Cost,
    /// Value immediately before this write, not the original input value
    pub old_cost: Cost,
}

/// Receives every update as it is applied
pub trait RelaxationObserver {
    fn on_relaxation(&mut self, relaxation: &Relaxation);
}

/// Prints each update to stdout in the two-line report format
#[derive(Debug, Default)]
pub struct ConsoleReporter;

impl RelaxationObserver for ConsoleReporter {
    fn on_relaxation(&mut self, relaxation: &Relaxation) {
        println!("{}", update_line(relaxation));
        println!("{}", path_line(relaxation));
    }
}

/// `updating a->e to be 2 (was 100 before)`
pub fn update_line(relaxation: &Relaxation) -> String {
    format!(
        "updating {}->{} to be {} (was {} before)",
        relaxation.from, relaxation.to, relaxation.new_cost, relaxation.old_cost
    )
}

/// `shortest path is a->c->e`
pub fn path_line(relaxation: &Relaxation) -> String {
    format!(
        "shortest path is {}->{}->{}",
        relaxation.from, relaxation.via, relaxation.to
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_line_formats() {
        let relaxation = Relaxation {
            from: "a".to_string(),
            to: "e".to_string(),
            via: "c".to_string(),
            new_cost: 2,
            old_cost: 100,
        };

        assert_eq!(
            update_line(&relaxation),
            "updating a->e to be 2 (was 100 before)"
        );
        assert_eq!(path_line(&relaxation), "shortest path is a->c->e");
    }

    #[test]
    fn test_report_lines_with_negative_cost() {
        let relaxation = Relaxation {
            from: "x".to_string(),
            to: "y".to_string(),
            via: "z".to_string(),
            new_cost: -4,
            old_cost: 1,
        };

        assert_eq!(
            update_line(&relaxation),
            "updating x->y to be -4 (was 1 before)"
        );
    }
}
