use recycler::{Align, Recycler, RecyclerOptions};

fn main() {
    let items: Vec<String> = (0..100_000).map(|i| format!("item {i}")).collect();

    let mut engine =
        Recycler::new(RecyclerOptions::new(items.len(), 200).with_initial_viewport(450))
            .expect("valid configuration");

    println!("slot pool size: {}", engine.slot_count());
    println!("placeholder size: {}px", engine.total_size());

    engine.set_scroll_offset(123_456);
    engine.for_each_assignment(|a| {
        println!("slot {} -> {} @ {}px", a.slot, items[a.index], a.start);
    });

    let offset = engine.scroll_to_index(99_999, Align::End);
    println!("after scroll_to_index: offset={offset}");
}
