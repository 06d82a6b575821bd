use crate::Board;

const CORNER_WEIGHT: f64 = 15.0;
const OPEN_CELL_BONUS: f64 = 12.0;
const LATE_OPEN_CELL_BONUS: f64 = 2.0;
const LATE_GAME_CORNER: u32 = 512;

/// The corner holding the largest tile, as `(x, y)`.
///
/// Corners are tried top-left, top-right, bottom-left, bottom-right and a later corner only wins
/// when strictly larger.
pub fn max_corner(board: &Board) -> (usize, usize) {
    let last = board.size().saturating_sub(1);

    [(0, 0), (last, 0), (0, last), (last, last)]
        .into_iter()
        .reduce(|best, corner| {
            if board.get(corner.0, corner.1) > board.get(best.0, best.1) {
                corner
            } else {
                best
            }
        })
        .unwrap_or((0, 0))
}

/// Cells along the snake path from the dominant corner, corner first.
///
/// The walk heads toward whichever neighbour of the corner is larger (the vertical one on a tie),
/// bouncing off each edge and stepping one line inward, so every cell is visited exactly once.
pub fn snake(board: &Board) -> impl Iterator<Item = (usize, usize)> {
    let size = board.size() as isize;
    let (corner_x, corner_y) = max_corner(board);
    let (mut x, mut y) = (corner_x as isize, corner_y as isize);

    let x_dir = if x == 0 { 1 } else { -1 };
    let y_dir = if y == 0 { 1 } else { -1 };

    let (mut x_step, mut y_step) =
        if board.get_signed(x + x_dir, y) > board.get_signed(x, y + y_dir) {
            (x_dir, 0)
        } else {
            (0, y_dir)
        };

    let steps = (size * size - 1).max(0) as usize;

    let path = (0..steps).map(move |_| {
        x += x_step;
        y += y_step;

        if x < 0 || x >= size {
            x_step = -x_step;
            x += x_step;
            y += y_dir;
        }

        if y < 0 || y >= size {
            y_step = -y_step;
            y += y_step;
            x += x_dir;
        }

        (x as usize, y as usize)
    });

    std::iter::once((corner_x, corner_y)).chain(path)
}

/// Heuristic value of a board: large tiles should sit in a corner and descend along the snake.
///
/// Every step still on the descending chain earns the previous value plus one. The first time a
/// tile is larger than a nonzero predecessor the chain breaks; each such rise costs its excess.
/// Once off the chain, each step leaving an empty cell earns a flat bonus.
pub fn evaluate(board: &Board) -> f64 {
    let mut cells = snake(board).map(|(x, y)| board.get(x, y));

    let Some(corner) = cells.next() else {
        return 0.0;
    };

    let open_bonus = if corner > LATE_GAME_CORNER {
        OPEN_CELL_BONUS + LATE_OPEN_CELL_BONUS
    } else {
        OPEN_CELL_BONUS
    };

    let mut score = CORNER_WEIGHT * f64::from(corner);
    let mut on_chain = true;
    let mut last = corner;

    for value in cells {
        if on_chain {
            score += f64::from(last) + 1.0;
        } else if last == 0 {
            score += open_bonus;
        }

        if last != 0 && value > last {
            score -= f64::from(value - last);
            on_chain = false;
        }

        last = value;
    }

    score
}
