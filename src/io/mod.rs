/*!
# Export Utilities

Writes comparison tables and chain traces to disk. Enable the CSV writers via the `csv` feature.
*/

#[cfg(feature = "csv")]
pub mod csv;
