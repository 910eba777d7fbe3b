#![no_main]

//! Content and rules loader fuzzer.
//!
//! Arbitrary bytes must never panic the JSON loaders; content that loads
//! must be playable for at least the start of a run.

use boardroom::game::Roguelike;
use boardroom::{Content, RulesConfig};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    let _ = RulesConfig::from_json_str(text);

    let Ok(content) = Content::from_json_str(text) else {
        return;
    };
    let rules = RulesConfig {
        map_rows: 4,
        ..RulesConfig::default()
    };
    for class in content.classes() {
        let mut game = Roguelike::seeded(&content, rules.clone(), 0);
        // Validated content may still lack a layout or fit no map; only
        // rejections are allowed, never panics.
        let _ = game.start_run(&class.id);
        for node in game.selectable_nodes().into_iter().map(|n| n.id.clone()).collect::<Vec<_>>() {
            let _ = game.select_node(&node);
            let _ = game.end_player_turn();
        }
    }
});
