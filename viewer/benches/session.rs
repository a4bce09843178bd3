use chessview::options::parse_moves;
use chessview::{GameSession, ManualScheduler, Navigator, Rules, StartPosition};
use chessview_board::MemoryBoard;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::time::Duration;

const GAMES: [(&str, &str, &str); 4] = [
    (
        "opera",
        "standard",
        "1. e4 e5 2. Nf3 d6 3. d4 Bg4 4. dxe5 Bxf3 5. Qxf3 dxe5 6. Bc4 Nf6 7. Qb3 Qe7 \
         8. Nc3 c6 9. Bg5 b5 10. Nxb5 cxb5 11. Bxb5+ Nbd7 12. O-O-O Rd8 13. Rxd7 Rxd7 \
         14. Rd1 Qe6 15. Bxd7+ Nxd7 16. Qb8+ Nxb8 17. Rd8#",
    ),
    (
        "immortal",
        "standard",
        "1. e4 e5 2. f4 exf4 3. Bc4 Qh4+ 4. Kf1 b5 5. Bxb5 Nf6 6. Nf3 Qh6 7. d3 Nh5 \
         8. Nh4 Qg5 9. Nf5 c6 10. g4 Nf6 11. Rg1 cxb5 12. h4 Qg6 13. h5 Qg5 14. Qf3 Ng8 \
         15. Bxf4 Qf6 16. Nc3 Bc5 17. Nd5 Qxb2 18. Bd6 Bxg1 19. e5 Qxa1+ 20. Ke2 Na6 \
         21. Nxg7+ Kd8 22. Qf6+ Nxf6 23. Be7#",
    ),
    (
        "en_passant",
        "standard",
        "1. e4 Nf6 2. e5 d5 3. exd6 exd6 4. d4 Be7 5. d5 c5 6. dxc6 Nxc6 7. a4 a6 \
         8. a5 b5 9. axb6 Qxb6 10. h4 g5 11. hxg5 Rg8 12. gxf6 Bxf6",
    ),
    (
        "crazyhouse",
        "crazyhouse",
        "1. e4 d5 2. exd5 Qxd5 3. Nc3 Qe6+ 4. Qe2 Qxe2+ 5. Bxe2 Q@e4 6. P@d5 Qxg2 \
         7. Bf3 Qg6 8. Q@e4 Qxe4+ 9. Bxe4 P@e3",
    ),
];

fn games() -> impl Iterator<Item = (&'static str, Navigator)> {
    GAMES.iter().map(|&(name, variant, moves)| {
        let start = StartPosition::initial(Rules::from_name(variant).unwrap());
        (name, Navigator::new(start, parse_moves(moves)))
    })
}

fn bench_step_forward(c: &mut Criterion) {
    let mut group = c.benchmark_group("step_forward");
    for (name, nav) in games() {
        group.bench_function(name, |b| {
            b.iter(|| {
                let board = MemoryBoard::with_animation(Duration::ZERO);
                let mut session = GameSession::new(nav.clone(), board, ManualScheduler::new());
                while session.step_forward(None, true) {}
                black_box(session.current_move())
            })
        });
    }
}

fn bench_step_backward(c: &mut Criterion) {
    let mut group = c.benchmark_group("step_backward");
    for (name, nav) in games() {
        group.bench_function(name, |b| {
            b.iter(|| {
                let board = MemoryBoard::with_animation(Duration::ZERO);
                let mut session = GameSession::new(nav.clone(), board, ManualScheduler::new());
                session.go_to_last();
                while session.step_backward() {}
                black_box(session.current_move())
            })
        });
    }
}

fn bench_jump(c: &mut Criterion) {
    let mut group = c.benchmark_group("jump");
    for (name, mut nav) in games() {
        let len = nav.reachable_len();
        group.bench_function(name, |b| {
            b.iter(|| {
                for idx in 0..=len {
                    black_box(nav.jump(idx));
                }
            })
        });
    }
}

criterion_group!(session, bench_step_forward, bench_step_backward, bench_jump);

criterion_main!(session);
