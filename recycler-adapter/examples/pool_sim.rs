//! Simulates a scrolling viewport over a large list and shows how few slot
//! rebinds the recycling mapping needs.

use recycler::{Recycler, RecyclerOptions};
use recycler_adapter::SlotPool;

#[derive(Debug)]
struct Handle {
    content: Option<usize>,
    rebinds: usize,
}

fn main() {
    let mut engine = Recycler::new(RecyclerOptions::new(100_000, 200).with_initial_viewport(450))
        .expect("valid configuration");
    let mut pool: SlotPool<Handle> = SlotPool::new();

    for step in 0..12u64 {
        let offset = step * 130;
        engine.set_scroll_offset(offset);

        if pool.sync_with(&engine, |_| Handle {
            content: None,
            rebinds: 0,
        }) {
            println!("pool resized to {} slots", pool.len());
        }

        pool.bind(&engine, |handle, assignment| {
            let next = assignment.map(|a| a.index);
            if next != handle.content {
                handle.content = next;
                handle.rebinds += 1;
            }
        });

        let view: Vec<_> = pool.iter().map(|(_, h)| h.content).collect();
        println!("offset {offset:>5}: {view:?}");
    }

    for (slot, handle) in pool.iter() {
        println!("slot {slot}: {} rebinds", handle.rebinds);
    }
}
