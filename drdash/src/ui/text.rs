//! Plain-text extraction from a rendered ratatui buffer.

use ratatui::buffer::Buffer;

/// Converts every row of `buffer` into a string, trailing blanks trimmed.
pub fn buffer_lines(buffer: &Buffer) -> Vec<String> {
    let area = buffer.area;
    let mut lines = Vec::with_capacity(area.height as usize);

    for y in area.y..area.y + area.height {
        let mut line = String::with_capacity(area.width as usize);
        for x in area.x..area.x + area.width {
            let symbol = buffer.cell((x, y)).map(|c| c.symbol()).unwrap_or(" ");
            line.push_str(if symbol.is_empty() { " " } else { symbol });
        }
        lines.push(line.trim_end().to_string());
    }

    lines
}
