// Simple command-line application to play chess against yourself

use checkmatch::{
    board::PrettyStyle, BoardMask, Color, Coord, Match, PieceKind, SetupMode,
};
use std::io::{self, BufRead, Write};

fn prompt(stdin: &mut impl BufRead, text: &str) -> Option<String> {
    print!("{}", text);
    io::stdout().flush().ok()?;
    let mut s = String::new();
    match stdin.read_line(&mut s) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(s.trim().to_string()),
    }
}

fn print_match(m: &Match, highlight: BoardMask) {
    println!("{}", m.board().pretty(PrettyStyle::Utf8, highlight));
    for color in [Color::White, Color::Black] {
        let captured: Vec<String> = m
            .captured_pieces()
            .filter(|p| p.color() == color)
            .map(|p| p.cell().as_utf8_char().to_string())
            .collect();
        println!("Captured {} pieces: [{}]", color, captured.join(" "));
    }
    println!("Turn: {}", m.turn());
    if let Some(outcome) = m.outcome() {
        println!("{}!", outcome.to_string().to_uppercase());
        return;
    }
    println!("Waiting for player: {}", m.current_player());
    if m.is_check() {
        println!("CHECK!");
    }
}

fn main() {
    let mut stdin = io::stdin().lock();

    let mode = loop {
        let answer = match prompt(&mut stdin, "Would you like to play Chess960? (Y/N): ") {
            Some(s) => s,
            None => return,
        };
        match answer.parse::<SetupMode>() {
            Ok(mode) => break mode,
            Err(e) => println!("{}", e),
        }
    };

    let mut m = Match::new(mode);

    while m.outcome().is_none() {
        print_match(&m, BoardMask::EMPTY);
        println!();

        let src = match prompt(&mut stdin, "Source: ") {
            Some(s) => s,
            None => return,
        };
        let src: Coord = match src.parse() {
            Ok(c) => c,
            Err(e) => {
                println!("Bad square: {}", e);
                continue;
            }
        };
        match m.safe_targets(src) {
            Ok(targets) => print_match(&m, targets),
            Err(e) => {
                println!("{}", e);
                continue;
            }
        }

        let dst = match prompt(&mut stdin, "Target: ") {
            Some(s) => s,
            None => return,
        };
        let dst: Coord = match dst.parse() {
            Ok(c) => c,
            Err(e) => {
                println!("Bad square: {}", e);
                continue;
            }
        };
        if let Err(e) = m.execute(src, dst) {
            println!("{}", e);
            continue;
        }

        while m.pending_promotion().is_some() {
            let choice = match prompt(&mut stdin, "Enter piece for promotion (B/N/R/Q): ") {
                Some(s) => s,
                None => return,
            };
            let kind = match choice.parse::<PieceKind>() {
                Ok(k) => k,
                Err(e) => {
                    println!("Bad piece: {}", e);
                    continue;
                }
            };
            if let Err(e) = m.resolve_promotion(kind) {
                println!("{}", e);
            }
        }
    }

    print_match(&m, BoardMask::EMPTY);
}
