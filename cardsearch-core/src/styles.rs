//! Style sheets installed by the components
//!
//! Each sheet is keyed by a stable id. [`ensure_styles`] checks the document
//! for that id first, so calling it any number of times leaves exactly one
//! block behind.

use crate::host::Document;

pub const WARMUP_STYLE_ID: &str = "warmup-styles";
pub const SAMPLES_STYLE_ID: &str = "sample-queries-styles";

pub const WARMUP_CSS: &str = r#"
.warmup-message {
    display: flex;
    align-items: center;
    gap: 12px;
    color: #666;
    font-size: 14px;
}

.warmup-text {
    display: flex;
    flex-direction: column;
    gap: 4px;
}

.warmup-subtext {
    font-size: 12px;
    color: #888;
    font-style: italic;
}

.spinner {
    width: 20px;
    height: 20px;
    border: 2px solid #f3f3f3;
    border-top: 2px solid #3498db;
    border-radius: 50%;
    animation: spin 1s linear infinite;
}

@keyframes spin {
    0% { transform: rotate(0deg); }
    100% { transform: rotate(360deg); }
}
"#;

pub const SAMPLES_CSS: &str = r#"
.samples-header {
    text-align: center;
    margin-bottom: 2rem;
}

.sample-category {
    margin-bottom: 2rem;
    padding: 1rem;
    border-radius: 8px;
    background: #f8f9fa;
}

.category-title {
    color: #2c3e50;
    margin-bottom: 0.5rem;
}

.category-description {
    color: #6c757d;
    margin-bottom: 1rem;
    font-style: italic;
}

.queries-grid {
    display: grid;
    grid-template-columns: repeat(auto-fit, minmax(300px, 1fr));
    gap: 1rem;
}

.sample-query-card {
    background: white;
    border: 1px solid #dee2e6;
    border-radius: 8px;
    padding: 1rem;
    cursor: pointer;
    transition: all 0.2s ease;
    box-shadow: 0 2px 4px rgba(0,0,0,0.1);
}

.sample-query-card:hover,
.sample-query-card:focus {
    border-color: #007bff;
    box-shadow: 0 4px 8px rgba(0,0,0,0.15);
    transform: translateY(-2px);
}

.query-text {
    font-weight: bold;
    color: #007bff;
    margin-bottom: 0.5rem;
    font-family: monospace;
}

.query-description {
    color: #495057;
    margin-bottom: 0.75rem;
    line-height: 1.4;
}

.query-meta {
    display: flex;
    justify-content: space-between;
    align-items: center;
    font-size: 0.875rem;
}

.expected-results {
    color: #28a745;
    font-weight: 500;
}

.query-tags {
    display: flex;
    gap: 0.25rem;
    flex-wrap: wrap;
}

.tag {
    background: #e9ecef;
    color: #495057;
    padding: 0.125rem 0.5rem;
    border-radius: 12px;
    font-size: 0.75rem;
}

.compact-queries {
    display: flex;
    flex-wrap: wrap;
    gap: 0.5rem;
}

.compact-query-btn {
    background: #f8f9fa;
    border: 1px solid #dee2e6;
    border-radius: 20px;
    padding: 0.5rem 1rem;
    cursor: pointer;
    transition: all 0.2s ease;
    font-family: monospace;
}

.compact-query-btn:hover {
    background: #007bff;
    color: white;
    border-color: #007bff;
}

@media (max-width: 768px) {
    .queries-grid {
        grid-template-columns: 1fr;
    }

    .query-meta {
        flex-direction: column;
        align-items: flex-start;
        gap: 0.5rem;
    }
}
"#;

/// Install `css` under `style_id` unless a block with that id exists.
/// Returns true when this call added the block.
pub fn ensure_styles(document: &dyn Document, style_id: &str, css: &str) -> bool {
    if document.has_style(style_id) {
        return false;
    }
    document.append_style(style_id, css);
    true
}
