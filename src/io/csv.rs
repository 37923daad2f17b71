/*!
# I/O Utilities for Saving Sampler Output to CSV

This module provides functions to save frequency tables and chain traces to CSV files.
Enable via the `csv` feature.
*/

use ndarray::{Array2, Axis};
use std::error::Error;
use std::fs::File;

use csv::Writer;

use crate::stats::FrequencyTable;

/**
Saves a [`FrequencyTable`] as a CSV file with header `x,y,gibbs,direct` and one row per
observed pair, in `(x, y)` order.

# Examples

```rust
use dice_gibbs::io::csv::save_frequency_table_csv;
use dice_gibbs::stats::{FrequencyTable, Method};

let mut table = FrequencyTable::new();
table.record((3, 8), Method::Gibbs);
save_frequency_table_csv(&table, "/tmp/dice_table.csv").expect("Expecting saving table to succeed");
```
*/
pub fn save_frequency_table_csv(
    table: &FrequencyTable,
    filename: &str,
) -> Result<(), Box<dyn Error>> {
    let mut wtr = Writer::from_writer(File::create(filename)?);
    wtr.write_record(["x", "y", "gibbs", "direct"])?;
    for (&(x, y), &[gibbs, direct]) in table.iter() {
        wtr.write_record(&[x.to_string(), y.to_string(), gibbs.to_string(), direct.to_string()])?;
    }
    wtr.flush()?;
    Ok(())
}

/**
Saves chain traces (one `Array2` of shape **sample × dimension** per chain) as a CSV file.

The resulting CSV file will have:
- A header row containing `"chain"`, `"sample"`, and one column per dimension
  named `"dim_0"`, `"dim_1"`, etc.
- Each subsequent row will correspond to a single sample of a specific chain.

The number of dimensions is taken from the first chain.
*/
pub fn save_trace_csv<T: std::fmt::Display>(
    traces: &[Array2<T>],
    filename: &str,
) -> Result<(), Box<dyn Error>> {
    let mut wtr = Writer::from_writer(File::create(filename)?);
    let n_dims = traces.first().map_or(0, |t| t.ncols());

    let mut header: Vec<String> = vec!["chain".to_string(), "sample".to_string()];
    header.extend((0..n_dims).map(|i| format!("dim_{}", i)));
    wtr.write_record(&header)?;

    for (chain_idx, chain) in traces.iter().enumerate() {
        if chain.ncols() != n_dims {
            return Err(format!(
                "chain {chain_idx} has {} dimensions, expected {n_dims}",
                chain.ncols()
            )
            .into());
        }
        for (sample_idx, sample) in chain.axis_iter(Axis(0)).enumerate() {
            let mut row = vec![chain_idx.to_string(), sample_idx.to_string()];
            row.extend(sample.iter().map(|v| v.to_string()));
            wtr.write_record(&row)?;
        }
    }

    wtr.flush()?;
    Ok(())
}
