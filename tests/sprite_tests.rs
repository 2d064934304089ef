//! Sprite tests - movement, animation, fragments and collisions

mod support;

use std::sync::Arc;

use led_arcade::core::{Catalog, DrawOptions, MoveOptions, Sprite, TransformOptions};
use led_arcade::types::{Brightness, Color, Direction};
use support::recording_screen;

/// 0: single white cell, 1: 2x2 orange wall, 2: frames R / RR / RRR,
/// 3: 2x2 of four colors, 4: frames "G" / "GG"
const KINDS: &str = "\
W

O,O
O,O

R,,R,R,,R,R,R

W,R
G,B

G,,G,G
";

fn catalog() -> Catalog {
    Catalog::parse(KINDS).unwrap()
}

#[test]
fn test_wall_blocks_moves_onto_it() {
    let catalog = catalog();
    let (mut screen, _log) = recording_screen(12, 12);

    let mut wall = catalog.get(1usize);
    wall.set_position(&mut screen, 5, 5);
    let walls = [wall];

    let mut probe = catalog.get(0usize);
    probe.set_position(&mut screen, 4, 5);
    let opts = MoveOptions::new().walls(&walls);

    assert!(!probe.try_move(&mut screen, Direction::Right, &opts));
    assert_eq!(probe.position(), (4, 5));
    assert_eq!(screen.get_pixel(4, 5).unwrap().color, Color::White);

    probe.set_position(&mut screen, 7, 6);
    assert!(probe.try_move(&mut screen, Direction::Down, &opts));
    assert_eq!(probe.position(), (7, 7));
    assert_eq!(screen.get_pixel(7, 7).unwrap().color, Color::White);
    assert_eq!(screen.get_pixel(7, 6).unwrap().color, Color::Off);
}

#[test]
fn test_edge_moves_fail_without_allowance() {
    let catalog = catalog();
    let (mut screen, _log) = recording_screen(4, 4);
    let mut probe = catalog.get(0usize);
    probe.set_position(&mut screen, 0, 0);

    assert!(!probe.try_move(&mut screen, Direction::Left, &MoveOptions::new()));
    assert!(!probe.try_move(&mut screen, Direction::Up, &MoveOptions::new()));
    assert_eq!(probe.position(), (0, 0));

    probe.set_position(&mut screen, 3, 3);
    assert!(!probe.try_move(&mut screen, Direction::Right, &MoveOptions::new()));
    assert!(!probe.try_move(&mut screen, Direction::Down, &MoveOptions::new()));
}

#[test]
fn test_edge_allowance_lets_sprites_leave() {
    let catalog = catalog();
    let (mut screen, log) = recording_screen(4, 4);
    let mut probe = catalog.get(0usize);
    probe.set_position(&mut screen, 0, 1);

    let opts = MoveOptions::new().outside(2);
    assert!(probe.try_move(&mut screen, Direction::Left, &opts));
    assert!(probe.try_move(&mut screen, Direction::Left, &opts));
    assert_eq!(probe.position(), (-2, 1));
    assert!(!probe.try_move(&mut screen, Direction::Left, &opts));
    assert_eq!(probe.position(), (-2, 1));

    // Off-canvas footprints never reach the device
    assert!(log.lock().unwrap().cells.iter().all(|c| *c == Color::Off));
}

#[test]
fn test_fragment_splits_into_single_cells() {
    let catalog = catalog();
    let (mut screen, _log) = recording_screen(8, 8);
    let mut block = catalog.get(3usize);
    block.set_position(&mut screen, 3, 4);

    let pieces = block.fragment(&mut screen);
    assert!(!block.is_visible());

    let found: Vec<((i32, i32), Color)> = pieces
        .iter()
        .map(|p| (p.position(), p.current_frame().get(0, 0)))
        .collect();
    assert_eq!(
        found,
        vec![
            ((3, 4), Color::White),
            ((4, 4), Color::Red),
            ((3, 5), Color::Green),
            ((4, 5), Color::Blue),
        ]
    );
    for piece in &pieces {
        assert!(piece.is_visible());
        assert_eq!((piece.width(), piece.height()), (1, 1));
        let (column, row) = piece.position();
        assert_eq!(
            screen.get_pixel(column, row).unwrap().color,
            piece.current_frame().get(0, 0)
        );
    }
}

#[test]
fn test_transform_cycles_frames() {
    let catalog = catalog();
    let (mut screen, _log) = recording_screen(8, 8);
    let mut bar = catalog.get(2usize);
    bar.set_position(&mut screen, 0, 0);
    assert_eq!(bar.frame_count(), 3);

    let mut seen = Vec::new();
    for _ in 0..3 {
        assert!(bar.transform(&mut screen, &TransformOptions::new()));
        seen.push(bar.frame_index());
    }
    assert_eq!(seen, vec![1, 2, 0]);

    // Back on frame 0 the old wider frame is gone
    assert_eq!(screen.get_pixel(0, 0).unwrap().color, Color::Red);
    assert_eq!(screen.get_pixel(1, 0).unwrap().color, Color::Off);
    assert_eq!(screen.get_pixel(2, 0).unwrap().color, Color::Off);
}

#[test]
fn test_transform_blocked_by_wall_changes_nothing() {
    let catalog = catalog();
    let (mut screen, _log) = recording_screen(8, 8);

    let mut wall = catalog.get(1usize);
    wall.set_position(&mut screen, 2, 0);
    let walls = [wall];

    let mut bar = catalog.get(2usize);
    bar.set_position(&mut screen, 0, 0);
    assert!(bar.transform(&mut screen, &TransformOptions::new().walls(&walls)));
    assert_eq!(bar.frame_index(), 1);

    // Frame 2 would reach column 2
    assert!(!bar.transform(&mut screen, &TransformOptions::new().walls(&walls)));
    assert_eq!(bar.frame_index(), 1);
    assert_eq!(screen.get_pixel(1, 0).unwrap().color, Color::Red);
}

#[test]
fn test_erased_sprites_never_collide() {
    let catalog = catalog();
    let (mut screen, _log) = recording_screen(8, 8);
    let mut a = catalog.get(1usize);
    let mut b = catalog.get(0usize);
    a.set_position(&mut screen, 2, 2);
    b.set_position(&mut screen, 3, 3);
    assert!(a.is_colliding(&b, None, None));
    assert!(b.is_colliding(&a, None, None));

    b.erase(&mut screen);
    assert!(!a.is_colliding(&b, None, None));
    assert!(!b.is_colliding(&a, None, None));
}

#[test]
fn test_collision_is_pixel_exact() {
    let catalog = catalog();
    let (mut screen, _log) = recording_screen(8, 8);
    let mut glider = catalog.get(4usize);
    let mut dot = catalog.get(0usize);
    glider.set_position(&mut screen, 0, 0);
    dot.set_position(&mut screen, 1, 0);

    // Frame 0 is one cell wide, frame 1 reaches the dot
    assert!(!glider.is_colliding(&dot, None, None));
    assert!(glider.is_colliding(&dot, None, Some(1)));
    assert!(glider.is_colliding(&dot, Some((1, 0)), None));

    let mut wall = catalog.get(1usize);
    wall.set_position(&mut screen, 1, 0);
    let others = [glider.clone(), wall];
    let hits = dot.collisions(&others, None, None);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].width(), 2);
}

#[test]
fn test_draw_then_erase_leaves_off() {
    let catalog = catalog();
    let (mut screen, log) = recording_screen(6, 6);
    let before = screen.save();

    let mut block = catalog.get(3usize);
    block.set_position(&mut screen, 1, 1);
    block.set_brightness(Some(Brightness::Max));
    block.draw(&mut screen);
    assert_eq!(
        screen.get_pixel(2, 2).unwrap().brightness,
        Some(Brightness::Max)
    );

    block.erase(&mut screen);
    assert_eq!(screen.save(), before);
    assert!(log.lock().unwrap().cells.iter().all(|c| *c == Color::Off));
}

#[test]
fn test_under_save_restores_background() {
    let catalog = catalog();
    let (mut screen, _log) = recording_screen(6, 6);
    screen.fill(Color::Purple, None).unwrap();

    let mut dot = catalog.get(0usize);
    let opts = MoveOptions::new().under_save();
    // Nothing saved yet: the spot the sprite never painted keeps its color
    assert!(dot.try_move(&mut screen, Direction::Right, &opts));
    assert_eq!(screen.get_pixel(0, 0).unwrap().color, Color::Purple);
    assert_eq!(screen.get_pixel(1, 0).unwrap().color, Color::White);

    assert!(dot.try_move(&mut screen, Direction::Right, &opts));
    assert_eq!(screen.get_pixel(0, 0).unwrap().color, Color::Purple);
    assert_eq!(screen.get_pixel(1, 0).unwrap().color, Color::Purple);
    assert_eq!(screen.get_pixel(2, 0).unwrap().color, Color::White);
}

#[test]
fn test_under_save_survives_a_skipped_draw() {
    let catalog = catalog();
    let (mut screen, _log) = recording_screen(6, 6);
    screen.fill(Color::Purple, None).unwrap();

    let mut dot = catalog.get(0usize);
    dot.draw_with(
        &mut screen,
        DrawOptions {
            under_save: true,
            ..DrawOptions::default()
        },
    );
    assert_eq!(screen.get_pixel(0, 0).unwrap().color, Color::White);

    let hidden = MoveOptions::new().under_save().skip_draw();
    assert!(dot.try_move(&mut screen, Direction::Right, &hidden));
    assert_eq!(dot.position(), (1, 0));
    assert_eq!(screen.get_pixel(0, 0).unwrap().color, Color::Purple);
    assert_eq!(screen.get_pixel(1, 0).unwrap().color, Color::Purple);

    assert!(dot.try_move(&mut screen, Direction::Right, &MoveOptions::new().under_save()));
    assert_eq!(screen.get_pixel(0, 0).unwrap().color, Color::Purple);
    assert_eq!(screen.get_pixel(1, 0).unwrap().color, Color::Purple);
    assert_eq!(screen.get_pixel(2, 0).unwrap().color, Color::White);

    assert!(dot.try_move(&mut screen, Direction::Down, &MoveOptions::new().under_save()));
    let row: Vec<Color> = (0..6).map(|c| screen.get_pixel(c, 0).unwrap().color).collect();
    assert_eq!(row, vec![Color::Purple; 6]);
}

#[test]
fn test_skip_draw_moves_state_only() {
    let catalog = catalog();
    let (mut screen, log) = recording_screen(6, 6);
    let mut probe = catalog.get(0usize);
    probe.set_position(&mut screen, 2, 2);
    let writes = log.lock().unwrap().writes.len();

    assert!(probe.try_move(&mut screen, Direction::Down, &MoveOptions::new().skip_draw()));
    assert_eq!(probe.position(), (2, 3));
    assert_eq!(screen.get_pixel(2, 2).unwrap().color, Color::White);
    assert_eq!(screen.get_pixel(2, 3).unwrap().color, Color::Off);
    assert_eq!(log.lock().unwrap().writes.len(), writes);
}

#[test]
fn test_pulsate_advances_frame_with_move() {
    let catalog = catalog();
    let (mut screen, _log) = recording_screen(6, 6);
    let mut glider = catalog.get(4usize);
    glider.set_position(&mut screen, 0, 0);

    assert!(glider.try_move(&mut screen, Direction::Down, &MoveOptions::new().pulsate()));
    assert_eq!(glider.frame_index(), 1);
    assert_eq!(screen.get_pixel(1, 1).unwrap().color, Color::Green);
    assert_eq!(screen.get_pixel(0, 0).unwrap().color, Color::Off);
}

#[test]
fn test_instances_share_definitions() {
    let catalog = catalog();
    let a = catalog.get(2usize);
    let b = catalog.get(2usize);
    assert!(Arc::ptr_eq(a.definition(), b.definition()));
    assert_eq!(Arc::strong_count(a.definition()), 3);

    let fresh = Sprite::new(Arc::clone(catalog.definition(0usize).unwrap()));
    assert!(!fresh.is_visible());
    assert_eq!(fresh.position(), (0, 0));
}

#[test]
#[should_panic(expected = "unknown sprite id")]
fn test_unknown_id_panics() {
    catalog().get(99usize);
}
