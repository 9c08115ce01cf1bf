// Résumé rendering: HTML preview, LaTeX substitution, and PDF compilation.

pub mod html;
pub mod latex;
pub mod pdf;
pub mod templates;

pub use html::render_html;
pub use latex::substitute_template_variables;
pub use pdf::{placeholder_pdf, render_pdf, single_page_pdf};
pub use templates::{find_template, list_templates};
