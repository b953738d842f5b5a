//! Property-based tests for navigation, shuffle and position tracking
//!
//! Uses proptest to verify invariants across many random inputs.

mod common;

use common::{create_engine, create_test_tracks};
use proptest::prelude::*;
use preview_core::TrackId;
use preview_playback::{shuffled_order, PlaylistNavigator, PositionTracker};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashSet;
use std::time::Duration;

// ===== Helpers =====

#[derive(Debug, Clone, Copy)]
enum NavOp {
    Next,
    Previous,
    ToggleShuffle,
    ToggleRepeat,
}

fn arbitrary_op() -> impl Strategy<Value = NavOp> {
    prop_oneof![
        Just(NavOp::Next),
        Just(NavOp::Previous),
        Just(NavOp::ToggleShuffle),
        Just(NavOp::ToggleRepeat),
    ]
}

fn ids(len: usize) -> Vec<TrackId> {
    (1..=len as TrackId).collect()
}

fn navigator(seed: u64) -> PlaylistNavigator {
    PlaylistNavigator::new(Box::new(StdRng::seed_from_u64(seed)))
}

// ===== Property Tests =====

proptest! {
    /// Property: the shuffled projection is a permutation of the playlist
    /// that starts with the active track
    #[test]
    fn shuffle_projection_is_permutation(len in 1usize..40, start in 0usize..40, seed in any::<u64>()) {
        let start = start % len;
        let tracks = create_test_tracks(&ids(len));
        let mut nav = navigator(seed);
        nav.load(&tracks, tracks[start].id).unwrap();

        nav.toggle_shuffle();

        let shuffled: Vec<TrackId> = nav.shuffled_playlist().iter().map(|t| t.id).collect();
        prop_assert_eq!(shuffled.len(), len);
        prop_assert_eq!(shuffled[0], tracks[start].id);
        let unique: HashSet<TrackId> = shuffled.iter().copied().collect();
        prop_assert_eq!(unique.len(), len);
        prop_assert_eq!(nav.current_shuffled_index(), 0);
    }

    /// Property: toggling shuffle twice restores the linear index
    #[test]
    fn shuffle_round_trip_restores_index(len in 1usize..40, start in 0usize..40, seed in any::<u64>()) {
        let start = start % len;
        let tracks = create_test_tracks(&ids(len));
        let mut nav = navigator(seed);
        nav.load(&tracks, tracks[start].id).unwrap();

        nav.toggle_shuffle();
        nav.toggle_shuffle();

        prop_assert_eq!(nav.current_index(), start);
        prop_assert!(nav.shuffled_playlist().is_empty());
    }

    /// Property: no sequence of operations moves the active cursor out of range
    #[test]
    fn navigation_stays_in_range(
        len in 0usize..12,
        ops in prop::collection::vec(arbitrary_op(), 0..60),
        seed in any::<u64>(),
    ) {
        let tracks = create_test_tracks(&ids(len));
        let mut nav = navigator(seed);
        if len > 0 {
            nav.load(&tracks, tracks[0].id).unwrap();
        }

        for op in ops {
            let before = nav.current_track().map(|t| t.id);
            let had_next = nav.has_next();
            let had_previous = nav.has_previous();

            match op {
                NavOp::Next => {
                    prop_assert_eq!(nav.next(), had_next);
                }
                NavOp::Previous => {
                    prop_assert_eq!(nav.previous(), had_previous);
                }
                NavOp::ToggleShuffle => {
                    nav.toggle_shuffle();
                    prop_assert_eq!(nav.current_track().map(|t| t.id), before);
                }
                NavOp::ToggleRepeat => {
                    nav.toggle_repeat();
                }
            }

            if len == 0 {
                prop_assert!(nav.current_track().is_none());
            } else {
                prop_assert!(nav.current_track().is_some());
                prop_assert!(nav.active_index() < len);
            }
        }
    }

    /// Property: without repeat, next at the last index changes nothing
    #[test]
    fn next_at_end_without_repeat_is_noop(len in 1usize..20) {
        let tracks = create_test_tracks(&ids(len));
        let mut nav = navigator(1);
        nav.load(&tracks, tracks[len - 1].id).unwrap();

        prop_assert!(!nav.next());
        prop_assert_eq!(nav.current_index(), len - 1);
        prop_assert_eq!(nav.current_track().map(|t| t.id), Some(tracks[len - 1].id));
    }

    /// Property: the pinned shuffle order is a permutation of 0..len
    #[test]
    fn shuffled_order_is_permutation(len in 0usize..64, first in 0usize..64, seed in any::<u64>()) {
        let order = shuffled_order(len, Some(first), &mut StdRng::seed_from_u64(seed));
        let mut sorted = order.clone();
        sorted.sort_unstable();
        prop_assert_eq!(sorted, (0..len).collect::<Vec<_>>());
        if first < len {
            prop_assert_eq!(order[0], first);
        }
    }

    /// Property: progress is exactly 0 while the duration is zero
    #[test]
    fn progress_zero_without_duration(position in 0.0f64..10_000.0, seek in proptest::option::of(0.0f64..10_000.0)) {
        let mut tracker = PositionTracker::new();
        tracker.observe_tick(position);
        if let Some(seek) = seek {
            tracker.set_interactive_seek_value(Duration::from_secs_f64(seek));
        }
        prop_assert_eq!(tracker.progress(), 0.0);
    }

    /// Property: live ticks never move the displayed position during a seek
    #[test]
    fn ticks_never_move_seek_buffer(
        seek in 0.0f64..600.0,
        ticks in prop::collection::vec(0.0f64..600.0, 1..50),
    ) {
        let mut tracker = PositionTracker::new();
        let target = Duration::from_secs_f64(seek);
        tracker.set_interactive_seek_value(target);

        for tick in ticks {
            tracker.observe_tick(tick);
            prop_assert_eq!(tracker.displayed_position(), target);
        }

        tracker.complete_seek(Some(target));
        prop_assert_eq!(tracker.displayed_position(), target);
    }

    /// Property: playing any track of a list makes it current at its index
    #[test]
    fn play_selects_requested_track(len in 1usize..20, pick in 0usize..20) {
        let pick = pick % len;
        let tracks = create_test_tracks(&ids(len));
        let (mut engine, _h) = create_engine();

        engine.play(&tracks[pick], &tracks).unwrap();

        prop_assert_eq!(engine.current_track().map(|t| t.id), Some(tracks[pick].id));
        prop_assert_eq!(engine.current_index(), pick);
    }
}
