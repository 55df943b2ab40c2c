use std::sync::Arc;

use anyhow::{Context, Result};
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

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[(self.next_u64() % items.len() as u64) as usize]
    }
}

/// (site, share of launches, base success probability)
const SITES: [(&str, f64, f64); 4] = [
    ("CCAFS LC-40", 0.46, 0.27),
    ("VAFB SLC-4E", 0.18, 0.40),
    ("KSC LC-39A", 0.23, 0.77),
    ("CCAFS SLC-40", 0.13, 0.43),
];

/// Payloads launch vehicles commonly carry; reused so some masses repeat.
const COMMON_PAYLOADS: [f64; 6] = [500.0, 2490.0, 3600.0, 5300.0, 9600.0, 15600.0];

const BOOSTERS: [&str; 5] = ["v1.0", "v1.1", "FT", "B4", "B5"];

struct Launch {
    flight: i64,
    site: &'static str,
    payload: f64,
    class: i64,
    booster: &'static str,
}

fn generate(rng: &mut SimpleRng, count: i64) -> Vec<Launch> {
    (1..=count)
        .map(|flight| {
            let roll = rng.next_f64();
            let mut acc = 0.0;
            let (site, _, base) = SITES
                .iter()
                .copied()
                .find(|&(_, share, _)| {
                    acc += share;
                    roll < acc
                })
                .unwrap_or(SITES[0]);

            let payload = if rng.next_f64() < 0.3 {
                COMMON_PAYLOADS[(rng.next_u64() % COMMON_PAYLOADS.len() as u64) as usize]
            } else {
                (rng.next_f64() * 10_000.0).round()
            };

            // Later flights and lighter payloads succeed more often.
            let maturity = flight as f64 / count as f64 * 0.3;
            let p = (base + maturity - payload / 100_000.0).clamp(0.05, 0.95);
            let class = i64::from(rng.next_f64() < p);

            Launch {
                flight,
                site,
                payload,
                class,
                booster: rng.pick(&BOOSTERS),
            }
        })
        .collect()
}

fn write_csv(path: &str, launches: &[Launch]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).with_context(|| format!("creating {path}"))?;
    writer.write_record([
        "Flight Number",
        "Launch Site",
        "class",
        "Payload Mass (kg)",
        "Booster Version Category",
    ])?;
    for l in launches {
        writer.write_record([
            l.flight.to_string(),
            l.site.to_string(),
            l.class.to_string(),
            l.payload.to_string(),
            l.booster.to_string(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

fn write_parquet(path: &str, launches: &[Launch]) -> Result<()> {
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
            Arc::new(Int64Array::from_iter_values(launches.iter().map(|l| l.flight))),
            Arc::new(StringArray::from_iter_values(launches.iter().map(|l| l.site))),
            Arc::new(Int64Array::from_iter_values(launches.iter().map(|l| l.class))),
            Arc::new(Float64Array::from_iter_values(launches.iter().map(|l| l.payload))),
            Arc::new(StringArray::from_iter_values(launches.iter().map(|l| l.booster))),
        ],
    )
    .context("building record batch")?;

    let file = std::fs::File::create(path).with_context(|| format!("creating {path}"))?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let launches = generate(&mut rng, 56);

    let csv_path = "spacex_launch_dash.csv";
    let parquet_path = "spacex_launch_dash.parquet";
    write_csv(csv_path, &launches)?;
    write_parquet(parquet_path, &launches)?;

    let successes: i64 = launches.iter().map(|l| l.class).sum();
    println!(
        "Wrote {} launches ({successes} successful) to {csv_path} and {parquet_path}",
        launches.len()
    );
    Ok(())
}
