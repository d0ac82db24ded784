//! Line-oriented interactive driver around a tracked LRU cache.

use std::io::{self, BufRead, Write};

use recency_cache::{LruCache, TrackedCache, parse_capacity};

pub type SessionCache = TrackedCache<i64, i64, LruCache<i64, i64>>;

const HELP: &str = "\
Commands:
  put <key> <value>   insert or update an entry
  get <key>           look up an entry (moves it to MRU)
  remove <key>        drop an entry
  display             show entries from MRU to LRU
  stats               show hit/miss counters
  resize <capacity>   change capacity, evicting from the LRU end
  clear               drop every entry
  help                show this text
  exit                leave the session";

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Put(i64, i64),
    Get(i64),
    Remove(i64),
    Display,
    Stats,
    Resize(i64),
    Clear,
    Help,
    Exit,
}

pub fn run(
    cache: &mut SessionCache,
    reader: &mut impl BufRead,
    writer: &mut impl Write,
    interactive: bool,
) -> io::Result<()> {
    writeln!(
        writer,
        "LRU cache initialized with capacity {}.",
        cache.policy().capacity()
    )?;
    if interactive {
        writeln!(writer, "Type 'help' for commands.")?;
    }

    let mut line = String::new();
    loop {
        if interactive {
            write!(writer, "> ")?;
        }
        writer.flush()?;

        line.clear();
        if reader.read_line(&mut line)? == 0 {
            break;
        }
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        match parse_command(trimmed) {
            Ok(Command::Exit) => {
                writeln!(writer, "Exiting...")?;
                break;
            }
            Ok(command) => execute(cache, command, writer)?,
            Err(message) => writeln!(writer, "Invalid command: {}", message)?,
        }
    }

    writer.flush()
}

fn parse_command(line: &str) -> Result<Command, String> {
    let mut tokens = line.split_whitespace();
    let name = tokens.next().unwrap_or_default().to_ascii_lowercase();
    let args: Vec<&str> = tokens.collect();

    let command = match (name.as_str(), args.as_slice()) {
        ("put", [key, value]) => Command::Put(parse_int(key)?, parse_int(value)?),
        ("get", [key]) => Command::Get(parse_int(key)?),
        ("remove", [key]) => Command::Remove(parse_int(key)?),
        ("resize", [capacity]) => Command::Resize(parse_int(capacity)?),
        ("display", []) => Command::Display,
        ("stats", []) => Command::Stats,
        ("clear", []) => Command::Clear,
        ("help", []) => Command::Help,
        ("exit", []) | ("quit", []) => Command::Exit,
        ("put" | "get" | "remove" | "resize" | "display" | "stats" | "clear" | "help", _) => {
            return Err(format!("wrong number of arguments for '{}'", name));
        }
        _ => return Err(format!("unknown command '{}'", name)),
    };
    Ok(command)
}

fn parse_int(token: &str) -> Result<i64, String> {
    token
        .parse::<i64>()
        .map_err(|_| format!("'{}' is not an integer", token))
}

fn execute(cache: &mut SessionCache, command: Command, writer: &mut impl Write) -> io::Result<()> {
    match command {
        Command::Put(key, value) => {
            let existed = cache.policy().contains(&key);
            if let Some(evicted) = cache.put(key, value) {
                writeln!(
                    writer,
                    "Cache full! Evicted least recently used key {} (Value: {})",
                    evicted.key, evicted.value
                )?;
            }
            if existed {
                writeln!(
                    writer,
                    "Updated key {} with value {} and moved to MRU.",
                    key, value
                )?;
            } else {
                writeln!(writer, "Inserted key {} (Value: {}) into MRU.", key, value)?;
            }
        }
        Command::Get(key) => match cache.get(key) {
            Some(value) => writeln!(writer, "Result: {} (moved to MRU)", value)?,
            None => writeln!(writer, "Result: key {} not found", key)?,
        },
        Command::Remove(key) => match cache.remove(key) {
            Some(value) => writeln!(writer, "Removed key {} (Value: {}).", key, value)?,
            None => writeln!(writer, "Result: key {} not found", key)?,
        },
        Command::Display => display(cache, writer)?,
        Command::Stats => {
            let stats = cache.stats();
            writeln!(
                writer,
                "Operations: {}, Hits: {}, Misses: {}, Evictions: {}, Hit rate: {:.2}%",
                stats.total_operations, stats.hits, stats.misses, stats.evictions, stats.hit_rate
            )?;
        }
        Command::Resize(raw) => {
            let resized = parse_capacity(raw).and_then(|capacity| cache.resize(capacity));
            match resized {
                Ok(evicted) => {
                    for eviction in evicted {
                        writeln!(
                            writer,
                            "Evicted key {} (Value: {})",
                            eviction.key, eviction.value
                        )?;
                    }
                    writeln!(writer, "Capacity set to {}.", cache.policy().capacity())?;
                }
                Err(err) => writeln!(writer, "Invalid capacity: {}", err)?,
            }
        }
        Command::Clear => {
            cache.clear();
            writeln!(writer, "Cache cleared.")?;
        }
        Command::Help => writeln!(writer, "{}", HELP)?,
        Command::Exit => {}
    }
    Ok(())
}

fn display(cache: &SessionCache, writer: &mut impl Write) -> io::Result<()> {
    let snapshot = cache.snapshot();
    writeln!(writer, "--- Current Cache State (MRU -> LRU) ---")?;
    if snapshot.entries.is_empty() {
        writeln!(writer, "Cache is empty.")?;
    } else {
        let cells: Vec<String> = snapshot
            .entries
            .iter()
            .map(|entry| format!("[Key: {}, Val: {}]", entry.key, entry.value))
            .collect();
        writeln!(writer, "{}", cells.join(" <-> "))?;
    }
    writeln!(writer, "Capacity: {}/{}", snapshot.size, snapshot.capacity)?;
    writeln!(writer, "----------------------------------------")
}
