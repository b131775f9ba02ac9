/*!
# Saving Sampler Output to CSV

Enable via the `csv` feature.
*/

use std::fs::File;
use std::path::Path;

use csv::Writer;
use ndarray::Axis;

use crate::core::SampleRun;
use crate::error::{Result, SamplerError};

/**
Saves the samples of one or more runs as a CSV file.

The file has a header row `chain,sample,dim_0,...,dim_{d-1}` followed by one
row per recorded sample, chain by chain, samples in temporal order. With no
runs, or only empty runs, the file holds the header alone.

# Errors

[`SamplerError::InvalidArgument`] if the runs do not share a dimension; I/O
and CSV errors are propagated.

# Examples

```rust
use metrosampler::core::SampleRun;
use metrosampler::io::csv::save_csv;
use ndarray::arr2;

let run = SampleRun { samples: arr2(&[[1.0, 2.0], [3.0, 4.0]]), accepted: 1, total: 2 };
let path = std::env::temp_dir().join("metrosampler_doc.csv");
save_csv(&[run], &path).unwrap();
```
*/
pub fn save_csv<P: AsRef<Path>>(runs: &[SampleRun], filename: P) -> Result<()> {
    let n_dims = runs.first().map_or(0, |r| r.samples.ncols());
    if runs.iter().any(|r| r.samples.ncols() != n_dims) {
        return Err(SamplerError::invalid(
            "runs have inconsistent sample dimensions",
        ));
    }

    let mut wtr = Writer::from_writer(File::create(filename)?);

    let mut header: Vec<String> = vec!["chain".to_string(), "sample".to_string()];
    header.extend((0..n_dims).map(|i| format!("dim_{}", i)));
    wtr.write_record(&header)?;

    for (chain_idx, run) in runs.iter().enumerate() {
        for (sample_idx, sample) in run.samples.axis_iter(Axis(0)).enumerate() {
            let mut row = vec![chain_idx.to_string(), sample_idx.to_string()];
            row.extend(sample.iter().map(|v| v.to_string()));
            wtr.write_record(&row)?;
        }
    }

    wtr.flush()?;
    Ok(())
}
