use ratatui::{buffer::Buffer, layout::Rect, style::Style, widgets::Widget};

#[derive(Debug, Default)]
pub struct SetStyle(Style);
#[derive(Debug, Default)]
pub struct NoStyle;

/// Block of text drawn cell by cell, for ASCII art and banners.
///
/// With `ignore_whitespace` blank characters leave the cells below untouched,
/// so whatever was rendered first shows through.
#[derive(Debug, Default)]
pub struct MultiLine<U, T: ToString> {
    lines: Vec<T>,
    line_padding: u16,
    ignore_whitespace: bool,
    centered: bool,
    style: U,
}

impl<T> MultiLine<NoStyle, T>
where
    T: ToString,
{
    pub fn new(lines: Vec<T>) -> MultiLine<NoStyle, T> {
        MultiLine { lines, line_padding: 0, ignore_whitespace: false, centered: false, style: NoStyle }
    }

    pub fn style(self, style: Style) -> MultiLine<SetStyle, T> {
        MultiLine {
            lines: self.lines,
            line_padding: self.line_padding,
            ignore_whitespace: self.ignore_whitespace,
            centered: self.centered,
            style: SetStyle(style),
        }
    }
}

impl<U, T> MultiLine<U, T>
where
    T: ToString,
{
    pub fn line_padding(self, line_padding: u16) -> MultiLine<U, T> {
        Self { line_padding, ..self }
    }

    pub fn ignore_whitespace(self, ignore_whitespace: bool) -> MultiLine<U, T> {
        Self { ignore_whitespace, ..self }
    }

    /// Centre every line horizontally inside the render area.
    pub fn centered(self, centered: bool) -> MultiLine<U, T> {
        Self { centered, ..self }
    }

    pub fn height(&self) -> u16 {
        let n = self.lines.len() as u16;
        n + n.saturating_sub(1) * self.line_padding
    }

    pub fn width(&self) -> u16 {
        self.lines.iter().map(|line| line.to_string().chars().count()).max().unwrap_or(0) as u16
    }

    fn render_with(self, area: Rect, buf: &mut Buffer, style: Style) {
        for (index, line) in self.lines.iter().enumerate() {
            let y = area.y + index as u16 * (1 + self.line_padding);
            if y >= area.bottom() {
                break;
            }
            let line = line.to_string();
            let width = line.chars().count() as u16;
            let x = if self.centered { area.x + area.width.saturating_sub(width) / 2 } else { area.x };

            for (offset, c) in line.chars().enumerate() {
                let x = x + offset as u16;
                if x >= area.right() {
                    break;
                }
                if self.ignore_whitespace && c.is_whitespace() {
                    continue;
                }
                if let Some(cell) = buf.cell_mut((x, y)) {
                    cell.set_char(c).set_style(style);
                }
            }
        }
    }
}

impl<T: ToString> Widget for MultiLine<SetStyle, T> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let style = self.style.0;
        self.render_with(area, buf, style);
    }
}

impl<T: ToString> Widget for MultiLine<NoStyle, T> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        self.render_with(area, buf, Style::default());
    }
}
