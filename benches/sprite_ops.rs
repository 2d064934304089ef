use criterion::{black_box, criterion_group, criterion_main, Criterion};
use led_arcade::core::{Catalog, MoveOptions, Screen, TransformOptions};
use led_arcade::term::{LedShape, TerminalSimulator};
use led_arcade::types::{Direction, SpriteId};

fn catalog() -> Catalog {
    Catalog::load(concat!(env!("CARGO_MANIFEST_DIR"), "/assets/sprites.csv")).unwrap()
}

fn screen() -> Screen {
    Screen::new(Box::new(TerminalSimulator::detached(None, LedShape::Circle))).unwrap()
}

fn bench_try_move(c: &mut Criterion) {
    let catalog = catalog();
    let mut screen = screen();
    let mut ship = catalog.get(SpriteId::EnemyShip);
    ship.set_position(&mut screen, 10, 8);
    let mut direction = Direction::Left;

    c.bench_function("sprite_try_move", |b| {
        b.iter(|| {
            if !ship.try_move(&mut screen, black_box(direction), &MoveOptions::new()) {
                direction = direction.opposite();
            }
        })
    });
}

fn bench_move_against_maze(c: &mut Criterion) {
    let catalog = catalog();
    let mut screen = screen();
    let mut maze = catalog.get(SpriteId::PacMap);
    maze.set_position(&mut screen, 0, 0);
    let walls = [maze];
    let mut pacman = catalog.get(SpriteId::PacMan);
    pacman.set_position(&mut screen, 1, 1);
    let opts = MoveOptions::new().walls(&walls).pulsate();

    c.bench_function("pacman_move_with_walls", |b| {
        b.iter(|| {
            pacman.try_move(&mut screen, black_box(Direction::Right), &opts);
        })
    });
}

fn bench_collision(c: &mut Criterion) {
    let catalog = catalog();
    let mut screen = screen();
    let mut a = catalog.get(SpriteId::EnemyLong);
    let mut b = catalog.get(SpriteId::Rocket);
    a.set_position(&mut screen, 4, 4);
    b.set_position(&mut screen, 6, 5);

    c.bench_function("is_colliding", |bench| {
        bench.iter(|| black_box(a.is_colliding(black_box(&b), None, None)))
    });
}

fn bench_transform(c: &mut Criterion) {
    let catalog = catalog();
    let mut screen = screen();
    let mut block = catalog.get(SpriteId::BlockT);
    block.set_position(&mut screen, 10, 10);

    c.bench_function("transform_block", |b| {
        b.iter(|| {
            block.transform(&mut screen, &TransformOptions::new());
        })
    });
}

fn bench_save_restore(c: &mut Criterion) {
    let mut screen = screen();
    let snapshot = screen.save();

    c.bench_function("screen_save_restore", |b| {
        b.iter(|| {
            let saved = screen.save();
            screen.restore(black_box(&snapshot)).unwrap();
            black_box(saved);
        })
    });
}

criterion_group!(
    benches,
    bench_try_move,
    bench_move_against_maze,
    bench_collision,
    bench_transform,
    bench_save_restore
);
criterion_main!(benches);
