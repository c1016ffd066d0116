pub mod export;
pub mod formatter;

pub use export::{write_export, Export, ExportRow};
pub use formatter::{
    format_delta, format_event, format_highlights, format_nationality_counts, format_player_detail,
    format_rank_table, format_tsv, format_weighted, format_weights, should_use_colors, trend_label,
};
