use crate::Board;

/// Renders the board as a text grid, one bordered cell per position.
/// Marked cells get a `*` after their number.
pub fn visualize_board(board: &Board, marked: &[(usize, usize)]) -> String {
    let columns = board.columns();
    let mut result = String::new();

    push_border(&mut result, columns, '╭', '┬', '╮');
    for row in 0..board.rows() {
        if row > 0 {
            push_border(&mut result, columns, '├', '┼', '┤');
        }
        result.push('│');
        for column in 0..columns {
            match board.cell(row, column).number() {
                Some(number) => {
                    let mark = if marked.contains(&(row, column)) { '*' } else { ' ' };
                    result += &format!("{:>4}{}", number, mark);
                }
                None => result += "     ",
            }
            result.push('│');
        }
        result.push('\n');
    }
    push_border(&mut result, columns, '╰', '┴', '╯');
    result
}

fn push_border(out: &mut String, columns: usize, left: char, mid: char, right: char) {
    out.push(left);
    for column in 0..columns {
        *out += "─────";
        out.push(if column + 1 == columns { right } else { mid });
    }
    out.push('\n');
}
