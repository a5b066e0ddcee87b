//! Mermaid flowchart export for compiled graphs.
//!
//! Fixed edges render as solid arrows and conditional edges as dotted arrows.

use std::fmt::Write as _;
use std::path::Path;

use crate::{CompiledGraph, END, GraphError, START};

impl<S> CompiledGraph<S> {
    pub fn to_mermaid(&self) -> String {
        let mut out = String::from("flowchart TD\n");

        let _ = writeln!(out, "    {START}([{START}])");
        for name in &self.order {
            let _ = writeln!(out, "    {name}[{name}]");
        }
        let _ = writeln!(out, "    {END}([{END}])");

        let _ = writeln!(out, "    {START} --> {}", self.entry);
        for (from, to, conditional) in self.fixed_and_conditional_edges() {
            let arrow = if conditional { "-.->" } else { "-->" };
            let _ = writeln!(out, "    {from} {arrow} {to}");
        }

        out
    }

    pub fn write_mermaid(&self, path: impl AsRef<Path>) -> Result<(), GraphError> {
        let path = path.as_ref();
        std::fs::write(path, self.to_mermaid()).map_err(|error| {
            GraphError::export(format!("failed to write {}: {error}", path.display()))
        })
    }
}
