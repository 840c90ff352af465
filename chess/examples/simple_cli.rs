// Simple command-line application to play chess

use finchess::{board::PrettyStyle, Color, Coord, Game, Outcome, PieceKind};
use std::io::{self, BufRead, Write};

fn side_name(c: Color) -> &'static str {
    match c {
        Color::White => "White",
        Color::Black => "Black",
    }
}

fn print_taken(game: &Game, c: Color) {
    let taken = game.taken(c);
    if taken.is_empty() {
        return;
    }
    let worth: u32 = taken.iter().map(PieceKind::value).sum();
    let kinds: String = taken.iter().map(|k| k.as_char(c.inv())).collect();
    println!("{} has taken: {} (+{})", side_name(c), kinds, worth);
}

fn main() {
    let mut stdin = io::stdin().lock();

    let mut game = Game::new();

    loop {
        println!("{}", game.board().pretty(PrettyStyle::Ascii));
        print_taken(&game, Color::White);
        print_taken(&game, Color::Black);

        if let Some(outcome) = game.outcome() {
            match outcome {
                Outcome::Win(c) => println!("Game finished: {} wins", side_name(c)),
                Outcome::Draw => println!("Game finished: draw"),
            }
            break;
        }

        match game.picked_up() {
            Some(p) => {
                let dests: Vec<_> = p.moves().iter().map(|m| m.dst().to_string()).collect();
                println!(
                    "Picked `{}` up from {}",
                    p.kind().as_char(p.color()),
                    p.pos()
                );
                print!(
                    "Destination ({}), or any other square to drop: ",
                    dests.join(" ")
                );
            }
            None => {
                print!(
                    "{} to move, pick a square (or \"r\" to restart): ",
                    side_name(game.side_to_move())
                );
            }
        }
        io::stdout().flush().unwrap();

        let mut s = String::new();
        if stdin.read_line(&mut s).unwrap() == 0 {
            break;
        }
        let s = s.trim();
        if s == "r" {
            game.reset();
            println!();
            continue;
        }

        // A selection never fails; a square that makes no sense just
        // deselects. Only the parse itself is checked.
        let sq = match s.parse::<Coord>() {
            Ok(sq) => sq,
            Err(e) => {
                println!("Bad square: {}", e);
                println!();
                continue;
            }
        };
        game.select_square(sq.file(), sq.rank());
        println!();
    }
}
