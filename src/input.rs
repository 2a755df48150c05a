//! Reading of input particles
//!
//! Particles come as a whitespace-separated table with one particle per line:
//!
//! ```text
//! # event  collection            x    y    z    t    px   py   pz     E
//! 0        ProtonFilter/protons  0.1  0.0  5.0  0.0  0.4  0.1  5990.  5990.
//! ```
//!
//! `#` starts a comment and blank lines are ignored. Event numbers must never
//! decrease, so that all rows of an event are contiguous. Only rows of the
//! requested collection become particles, but every event number which
//! appears yields an event, even if it ends up empty.

use crate::{
    event::{Event, Particle},
    momentum::{Momentum, Position},
    numeric::Float,
    Result,
};

use anyhow::{ensure, Context};
use log::{debug, info};

use std::{fs, path::Path};

/// Names of the columns of a particle table, in order
pub const COLUMNS: [&str; 10] = ["event", "collection", "x", "y", "z", "t", "px", "py", "pz", "E"];

/// Read all events from a particle table on disk
pub fn read_events(file_name: impl AsRef<Path>, collection: &str) -> Result<Vec<Event>> {
    let file_name = file_name.as_ref();
    let table = fs::read_to_string(file_name)
        .with_context(|| format!("Could not read {}", file_name.display()))?;
    let events = parse_events(&table, collection)
        .with_context(|| format!("Could not load particles from {}", file_name.display()))?;
    info!(
        "Loaded {} events with {} {} particles from {}",
        events.len(),
        events.iter().map(|event| event.particles.len()).sum::<usize>(),
        collection,
        file_name.display()
    );
    Ok(events)
}

/// Parse all events of a particle table
pub fn parse_events(table: &str, collection: &str) -> Result<Vec<Event>> {
    let mut events = Vec::<Event>::new();
    let mut skipped_rows = 0;

    for (line_idx, line) in table.lines().enumerate() {
        let line_no = line_idx + 1;
        let content = line.split('#').next().unwrap_or_default();
        let fields = content.split_whitespace().collect::<Vec<_>>();
        if fields.is_empty() {
            continue;
        }
        ensure!(
            fields.len() == COLUMNS.len(),
            "Expected {} columns on line {}, found {}",
            COLUMNS.len(),
            line_no,
            fields.len()
        );

        let index = fields[0]
            .parse::<u64>()
            .with_context(|| format!("Could not parse event number on line {}", line_no))?;
        let is_new_event = match events.last() {
            Some(last) if last.index == index => false,
            Some(last) => {
                ensure!(
                    index > last.index,
                    "Event {} on line {} comes after event {}",
                    index,
                    line_no,
                    last.index
                );
                true
            }
            None => true,
        };
        if is_new_event {
            events.push(Event::new(index));
        }

        if fields[1] != collection {
            skipped_rows += 1;
            continue;
        }

        let mut values: [Float; 8] = [0.; 8];
        for ((value, field), name) in values.iter_mut().zip(&fields[2..]).zip(&COLUMNS[2..]) {
            *value = field
                .parse()
                .with_context(|| format!("Could not parse {} on line {}", name, line_no))?;
        }
        let [x, y, z, t, px, py, pz, e] = values;
        let current = events.len() - 1;
        events[current].particles.push(Particle::new(
            Position::new(x, y, z, t),
            Momentum::new(px, py, pz, e),
        ));
    }

    if skipped_rows > 0 {
        debug!("Ignored {} rows from collections other than {}", skipped_rows, collection);
    }
    Ok(events)
}
