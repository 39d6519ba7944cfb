use fibre_timecache::{CacheBuilder, JanitorConfig};
use std::thread;
use std::time::Duration;

fn main() {
  // Entries live 5 seconds by default; the janitor sweeps every second and
  // hands the lock to readers every 1000 inspected entries.
  let cache = CacheBuilder::default()
    .store_duration(Duration::from_secs(5))
    .janitor(JanitorConfig::every(Duration::from_secs(1)).yield_every(1_000))
    .build()
    .expect("Failed to build cache");

  println!("Storing ('session', 100) with the default duration.");
  cache.store_default("session".to_string(), 100);
  println!("Storing ('flash', 7) for 500ms.");
  cache.store("flash".to_string(), 7, Duration::from_millis(500));

  match cache.get("session") {
    Ok(value) => println!("Found value for session: {}", value),
    Err(e) => println!("session: {}", e),
  }

  cache
    .update("session", Duration::from_secs(5), |v| v + 1)
    .expect("session is live");
  println!("After update, session = {:?}", cache.get("session"));

  println!("\nWaiting 2 seconds; 'flash' expires and the janitor removes it...");
  thread::sleep(Duration::from_secs(2));
  println!("flash: {:?}", cache.get("flash"));
  println!("Entries stored: {}", cache.count());

  println!("\nCache metrics: {:#?}", cache.metrics());

  cache.stop_janitor();
}
