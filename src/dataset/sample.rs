use crate::dataset::record::{DatasetSpec, OperationRecord, ValidatedDataset};

/// Built-in latency/throughput numbers every programmer should know.
pub fn sample_dataset() -> anyhow::Result<ValidatedDataset> {
    let operations = vec![
        OperationRecord::new("CPU L1 Cache Access", "30 GiB/s", 0.5, "Ultra-fast on-core cache"),
        OperationRecord::new("CPU L2 Cache Access", "20 GiB/s", 7.0, "Fast on-core cache"),
        OperationRecord::new("CPU L3 Cache Access", "15 GiB/s", 20.0, "Shared cache between cores"),
        OperationRecord::new("Sequential Memory R/W", "10 GiB/s", 100.0, "Predictable memory access"),
        OperationRecord::new("Random Memory R/W", "1 GiB/s", 50.0, "Unpredictable memory access"),
        OperationRecord::new("Sequential SSD read", "4 GiB/s", 1000.0, "Reading consecutive SSD blocks"),
        OperationRecord::new("Sequential SSD write", "1 GiB/s", 10000.0, "Writing consecutive SSD blocks"),
        OperationRecord::new("Random SSD Read", "70 MiB/s", 100000.0, "Reading scattered SSD blocks"),
        OperationRecord::new("Network Same-Zone", "10 GiB/s", 250000.0, "Same datacenter communication"),
        OperationRecord::new("Compression", "500 MiB/s", 100000.0, "Data compression operation"),
        OperationRecord::new("NA East <-> West", "25 MiB/s", 60000000.0, "Cross-continent network"),
    ];

    DatasetSpec { operations }.validate_and_build()
}
