use bench_matrix::{
  criterion_runner::sync_suite::SyncBenchmarkSuite, AbstractCombination, MatrixCellValue,
};
use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use fibre_timecache::{Cache, CacheBuilder};
use rand::prelude::{SliceRandom, StdRng};
use rand::SeedableRng;
use std::sync::{Arc, Barrier};
use std::thread;
use std::time::{Duration, Instant};

// --- Config, State, Context ---

#[derive(Debug, Clone)]
struct BenchConfig {
  op_type: String,
  yield_every: usize,
  num_items: usize,
  concurrency: usize,
}

struct BenchState {
  cache: Arc<Cache<u64, u64>>,
  // Each thread gets its own set of keys to operate on
  keys_by_thread: Vec<Vec<u64>>,
}

type BenchContext = ();

// --- Extractor Function ---

fn extract_config(combo: &AbstractCombination) -> Result<BenchConfig, String> {
  Ok(BenchConfig {
    op_type: combo.get_string(0)?.to_string(),
    yield_every: combo.get_u64(1)? as usize,
    num_items: combo.get_u64(2)? as usize,
    concurrency: combo.get_u64(3)? as usize,
  })
}

// --- Benchmark Functions ---

fn setup_fn(cfg: &BenchConfig) -> Result<(BenchContext, BenchState), String> {
  let cache = Arc::new(
    CacheBuilder::default()
      .store_duration(Duration::from_secs(600))
      .yield_every(cfg.yield_every)
      .build()
      .map_err(|e| e.to_string())?,
  );

  // Pre-populate in a single thread. Half of the entries are already expired
  // so the sweeper has work to do alongside the readers.
  for i in 0..cfg.num_items as u64 {
    let ttl = if i % 2 == 0 { Duration::from_secs(600) } else { Duration::ZERO };
    cache.store(i, i, ttl);
  }

  let mut workload_keys: Vec<u64> = match cfg.op_type.as_str() {
    "GetHit" => (0..cfg.num_items as u64).step_by(2).collect(),
    "GetMiss" => (cfg.num_items as u64..2 * cfg.num_items as u64).collect(),
    "Store" => (cfg.num_items as u64..2 * cfg.num_items as u64).collect(),
    "GetDuringSweep" => (0..cfg.num_items as u64).step_by(2).collect(),
    _ => return Err("Invalid operation type".to_string()),
  };

  let mut rng = StdRng::from_seed([0; 32]);
  workload_keys.shuffle(&mut rng);

  let mut keys_by_thread = vec![Vec::new(); cfg.concurrency];
  for (i, key) in workload_keys.into_iter().enumerate() {
    keys_by_thread[i % cfg.concurrency].push(key);
  }

  Ok((
    (),
    BenchState {
      cache,
      keys_by_thread,
    },
  ))
}

fn benchmark_logic(
  _ctx: BenchContext,
  state: BenchState,
  cfg: &BenchConfig,
) -> (BenchContext, BenchState, Duration) {
  let sweeping = cfg.op_type == "GetDuringSweep";
  let barrier = Arc::new(Barrier::new(cfg.concurrency + usize::from(sweeping)));

  let start_time = Instant::now();

  thread::scope(|s| {
    if sweeping {
      let barrier_clone = barrier.clone();
      let cache_clone = state.cache.clone();
      s.spawn(move || {
        barrier_clone.wait();
        black_box(cache_clone.sweep_expired());
      });
    }

    for thread_keys in &state.keys_by_thread {
      let barrier_clone = barrier.clone();
      let cache_clone = state.cache.clone();
      let op_type = cfg.op_type.clone();

      s.spawn(move || {
        barrier_clone.wait();

        match op_type.as_str() {
          "GetHit" | "GetMiss" | "GetDuringSweep" => {
            for key in thread_keys {
              let _ = black_box(cache_clone.get(key));
            }
          }
          "Store" => {
            for key in thread_keys {
              cache_clone.store_default(*key, *key);
            }
          }
          _ => unreachable!(),
        }
      });
    }
  });

  let duration = start_time.elapsed();
  ((), state, duration)
}

fn sync_benches(c: &mut Criterion) {
  let parameter_axes = vec![
    vec![
      MatrixCellValue::String("GetHit".to_string()),
      MatrixCellValue::String("GetMiss".to_string()),
      MatrixCellValue::String("Store".to_string()),
      MatrixCellValue::String("GetDuringSweep".to_string()),
    ], // Operation Type
    vec![MatrixCellValue::Unsigned(0), MatrixCellValue::Unsigned(1_000)], // Yield Every
    vec![
      MatrixCellValue::Unsigned(10_000),
      MatrixCellValue::Unsigned(100_000),
    ], // Number of Items
    vec![
      MatrixCellValue::Unsigned(1), // Concurrency
      MatrixCellValue::Unsigned(4),
    ],
  ];
  let parameter_names = vec![
    "Op".to_string(),
    "Yield".to_string(),
    "Items".to_string(),
    "Threads".to_string(),
  ];

  SyncBenchmarkSuite::new(
    c,
    "SyncBasicOps".to_string(),
    Some(parameter_names),
    parameter_axes,
    Box::new(extract_config),
    setup_fn,
    benchmark_logic,
    |_, _, _| {}, // Teardown
  )
  .throughput(|cfg: &BenchConfig| Throughput::Elements(cfg.num_items as u64))
  .run();
}

criterion_group!(benches, sync_benches);
criterion_main!(benches);
