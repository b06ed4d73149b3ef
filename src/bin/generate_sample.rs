use std::sync::Arc;

use arrow::array::{Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[(self.next_u64() % items.len() as u64) as usize]
    }
}

/// (booster category, success probability, typical payload kg)
const BOOSTERS: [(&str, f64, f64); 5] = [
    ("v1.0", 0.0, 500.0),
    ("v1.1", 0.15, 2500.0),
    ("FT", 0.7, 4000.0),
    ("B4", 0.65, 5500.0),
    ("B5", 0.95, 6000.0),
];

const SITES: [&str; 4] = ["CCAFS LC-40", "VAFB SLC-4E", "KSC LC-39A", "CCAFS SLC-40"];

const FLIGHTS: usize = 56;
const MAX_PAYLOAD_KG: f64 = 9600.0;

fn main() {
    let mut rng = SimpleRng::new(42);

    let mut flight_numbers: Vec<i64> = Vec::with_capacity(FLIGHTS);
    let mut sites: Vec<String> = Vec::with_capacity(FLIGHTS);
    let mut payloads: Vec<f64> = Vec::with_capacity(FLIGHTS);
    let mut classes: Vec<i64> = Vec::with_capacity(FLIGHTS);
    let mut boosters: Vec<String> = Vec::with_capacity(FLIGHTS);

    for flight in 0..FLIGHTS {
        // Booster generations follow each other over time.
        let generation = (flight * BOOSTERS.len()) / FLIGHTS;
        let (booster, p_success, typical) = BOOSTERS[generation];

        let payload = (typical * (0.4 + 1.2 * rng.next_f64())).round().min(MAX_PAYLOAD_KG);
        let success = rng.next_f64() < p_success;

        flight_numbers.push(flight as i64 + 1);
        sites.push(rng.pick(&SITES).to_string());
        payloads.push(payload);
        classes.push(i64::from(success));
        boosters.push(booster.to_string());
    }

    // Write CSV
    let csv_path = "spacex_launch_dash.csv";
    let mut writer = csv::Writer::from_path(csv_path).expect("Failed to create CSV file");
    writer
        .write_record(["Flight Number", "Launch Site", "class", "Payload Mass (kg)", "Booster Version Category"])
        .expect("Failed to write CSV header");
    for i in 0..FLIGHTS {
        writer
            .write_record([
                flight_numbers[i].to_string(),
                sites[i].clone(),
                classes[i].to_string(),
                format!("{:.1}", payloads[i]),
                boosters[i].clone(),
            ])
            .expect("Failed to write CSV row");
    }
    writer.flush().expect("Failed to flush CSV file");

    // Write Parquet
    let schema = Arc::new(Schema::new(vec![
        Field::new("Flight Number", DataType::Int64, false),
        Field::new("Launch Site", DataType::Utf8, false),
        Field::new("class", DataType::Int64, false),
        Field::new("Payload Mass (kg)", DataType::Float64, false),
        Field::new("Booster Version Category", DataType::Utf8, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(Int64Array::from(flight_numbers)),
            Arc::new(StringArray::from(sites)),
            Arc::new(Int64Array::from(classes.clone())),
            Arc::new(Float64Array::from(payloads)),
            Arc::new(StringArray::from(boosters)),
        ],
    )
    .expect("Failed to create RecordBatch");

    let parquet_path = "spacex_launch_dash.parquet";
    let file = std::fs::File::create(parquet_path).expect("Failed to create output file");
    let mut writer = ArrowWriter::try_new(file, schema, None).expect("Failed to create writer");
    writer.write(&batch).expect("Failed to write batch");
    writer.close().expect("Failed to close writer");

    let successes = classes.iter().filter(|&&c| c == 1).count();
    println!(
        "Wrote {FLIGHTS} launches ({successes} successful) to {csv_path} and {parquet_path}"
    );
}
