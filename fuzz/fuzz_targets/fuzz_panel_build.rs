#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use megapanel_layout::{Item, LayoutConfig, PanelBuilder, SplitTieBreak};

#[derive(Debug, Arbitrary)]
struct Input {
    columns: i8,
    multiplier: u8,
    last_processed: bool,
    weights: Vec<u8>,
}

fuzz_target!(|input: Input| {
    let weights: Vec<u64> = input.weights.iter().take(64).map(|&w| u64::from(w)).collect();
    let items: Vec<Item> = weights
        .iter()
        .enumerate()
        .map(|(i, &w)| Item::new(i.to_string(), w))
        .collect();

    let tie_break = if input.last_processed {
        SplitTieBreak::LastProcessed
    } else {
        SplitTieBreak::FirstProcessed
    };
    let config = LayoutConfig::default()
        .with_split_multiplier(u32::from(input.multiplier.max(1)))
        .with_tie_break(tie_break);
    let builder = PanelBuilder::new(config).expect("multiplier >= 1 is valid");

    let Some(panel) = builder.build_items(&items, i64::from(input.columns)) else {
        assert!(items.is_empty());
        return;
    };

    // Every item exactly once, in source order.
    let placed: Vec<usize> = panel
        .item_ids()
        .map(|id| id.parse().expect("numeric id"))
        .collect();
    assert_eq!(placed, (0..items.len()).collect::<Vec<_>>());

    // Contiguous numbering, no empty columns.
    for (offset, (&number, column)) in panel.columns.iter().enumerate() {
        assert_eq!(usize::from(number), offset + 1);
        assert!(!column.is_empty());
    }

    // The split never shares its column.
    if let Some(split_col) = panel.split_col {
        assert_eq!(panel.column(split_col).map(<[String]>::len), Some(1));
    }
});
