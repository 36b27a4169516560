//! Fixed closing section pointing readers at the interactive graph viewer.

use crate::reporting::ReportBuilder;

pub const VISUALIZATION_TITLE: &str = "Interactive Visualization";

/// Command that starts the local documentation site.
pub const SERVE_COMMAND: &str = "npm run serve";

const FEATURES: [&str; 4] = [
    "**Interactive graph**: explore how documents and concepts connect",
    "**Search**: jump to any concept or document by name",
    "**Filtering**: narrow the graph by concept type or category",
    "**Details panel**: inspect frequency, file count and links for a selected node",
];

/// Append the "Interactive Visualization" section. It depends on no input
/// data and cannot fail.
pub fn write_visualization_section(builder: &mut ReportBuilder) {
    builder
        .add_heading(VISUALIZATION_TITLE)
        .add_paragraph(
            "The knowledge graph behind this report can be explored interactively \
             in the documentation site.",
        )
        .add_subheading("How to Access")
        .add_paragraph("Start the local documentation server:")
        .add_code_block(SERVE_COMMAND, "shell")
        .add_subheading("Features")
        .add_list(&FEATURES, false);
}
