// Replays games from stdin on a text board
//
// Input is either PGN or a chess block with `key: value` options, for example:
//
//     echo 'moves: 1. e4 e5 2. Nf3 Nc6 3. Bb5' | cargo run --example replay

use chessview::{
    read_games, BlockOptions, Game, GameSession, ManualScheduler, StaticPosition, ViewerConfig,
};
use chessview_board::{BoardWidget, MemoryBoard};
use std::io::{self, Read};

fn is_pgn(text: &str) -> bool {
    let text = text.trim_start();
    text.starts_with('[') || text.starts_with("1.")
}

fn play(mut session: GameSession<MemoryBoard, ManualScheduler>) {
    println!("Start:\n{}", session.board().pretty());
    session.toggle_autoplay();
    while session.current_move() > 0 {
        println!("Move {}/{}:", session.current_move(), session.len());
        println!("{}", session.board().pretty());
        let Some(id) = session.scheduler_mut().fire_next() else {
            break;
        };
        session.on_timer(id);
    }
    if session.reachable_len() < session.len() {
        println!(
            "Cannot play move {}: {}",
            session.reachable_len() + 1,
            session.navigator().moves()[session.reachable_len()]
        );
    }
    println!("{}", session.info_text());
    println!();
}

fn main() {
    let mut text = String::new();
    if let Err(e) = io::stdin().read_to_string(&mut text) {
        eprintln!("Cannot read input: {}", e);
        return;
    }

    let config = ViewerConfig::default().sanitized();
    let options = BlockOptions::parse(&text);

    if !is_pgn(&text) {
        if !options.has_moves() {
            let mut board = MemoryBoard::new();
            board.set(options.initial_state());
            println!("{}", board.pretty());
            let position = StaticPosition::from_options(&options);
            println!("{}", position.info_text(board.shapes()));
            return;
        }
        let session = Game::from_options(&options).into_session(
            MemoryBoard::new(),
            ManualScheduler::new(),
            &config,
        );
        play(session);
        return;
    }

    for (idx, game) in read_games(&text).into_iter().enumerate() {
        match game {
            Ok(game) => {
                println!("Game {}: {}", idx + 1, game.title());
                println!("{}", game.summary());
                let session = Game::from_pgn(&game, &BlockOptions::default(), &config)
                    .into_session(MemoryBoard::new(), ManualScheduler::new(), &config);
                play(session);
            }
            Err(e) => println!("Game {}: {}\n", idx + 1, e),
        }
    }
}
