use criterion::{black_box, criterion_group, criterion_main, Criterion};
use finchess::{
    legal::filter_legal_moves,
    movegen::generate_moves,
    moves::{apply_move, undo_move},
    Board, Game, Move,
};

const BOARDS: [(&'static str, &'static str); 10] = [
    ("initial", "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR"),
    (
        "sicilian",
        "r1b1k2r/2qnbppp/p2ppn2/1p4B1/3NPPP1/2N2Q2/PPP4P/2KR1B1R",
    ),
    (
        "middle",
        "1rq1r1k1/1p3ppp/pB3n2/3ppP2/Pbb1P3/1PN2B2/2P2QPP/R1R4K",
    ),
    (
        "open_position",
        "4r1k1/3R1ppp/8/5P2/p7/6PP/4pK2/1rN1B3",
    ),
    ("queen", "6K1/8/8/1k3q2/3Q4/8/8/8"),
    ("pawn_move", "4k3/pppppppp/8/8/8/8/PPPPPPPP/4K3"),
    ("pawn_attack", "4k3/8/8/pppppppp/PPPPPPPP/8/8/4K3"),
    ("pawn_promote", "8/PPPPPPPP/8/2k1K3/8/8/pppppppp/8"),
    ("cydonia", "5K2/1N1N1N2/8/1N1N1N2/1n1n1n2/8/1n1n1n2/5k2"),
    ("max", "3Q4/1Q4Q1/4Q3/2Q4R/Q4Q2/3Q4/NR4Q1/kN1BB1K1"),
];

fn boards() -> impl Iterator<Item = (&'static str, Board)> {
    BOARDS
        .iter()
        .map(|&(name, placement)| (name, Board::from_placement(placement).unwrap()))
}

fn side_move_count(board: &Board) -> usize {
    let side = board.side();
    board
        .pieces()
        .filter(|(_, p)| p.color() == side)
        .map(|(_, p)| p.moves().len())
        .sum()
}

fn bench_gen_moves(c: &mut Criterion) {
    let mut group = c.benchmark_group("gen_moves");
    for (name, mut board) in boards() {
        group.bench_function(name, |b| {
            b.iter(|| {
                generate_moves(&mut board);
                black_box(side_move_count(&board))
            })
        });
    }
}

fn bench_apply_undo(c: &mut Criterion) {
    let mut group = c.benchmark_group("apply_undo");
    for (name, mut board) in boards() {
        generate_moves(&mut board);
        let side = board.side();
        let moves: Vec<Move> = board
            .pieces()
            .filter(|(_, p)| p.color() == side)
            .flat_map(|(_, p)| p.moves().iter().copied())
            .collect();
        group.bench_function(name, |b| {
            b.iter(|| {
                for mv in &moves {
                    let u = apply_move(&mut board, *mv);
                    undo_move(&mut board, *mv, u);
                }
            })
        });
    }
}

fn bench_filter_legal(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter_legal");
    for (name, mut board) in boards() {
        group.bench_function(name, |b| {
            b.iter(|| {
                generate_moves(&mut board);
                filter_legal_moves(&mut board);
                black_box(side_move_count(&board))
            })
        });
    }
}

fn bench_load_position(c: &mut Criterion) {
    let mut group = c.benchmark_group("load_position");
    for &(name, placement) in BOARDS.iter() {
        let mut game = Game::new();
        group.bench_function(name, |b| {
            b.iter(|| {
                game.load_position(placement);
                black_box(game.is_finished())
            })
        });
    }
}

criterion_group!(
    movegen,
    bench_gen_moves,
    bench_apply_undo,
    bench_filter_legal,
    bench_load_position,
);

criterion_main!(movegen);
