//! Pagination engine.
//!
//! A report is described as an ordered list of [`Block`]s. [`paginate`] flows
//! them top to bottom through the page frame, splitting tables between rows
//! and starting new pages as needed, and produces absolute [`DrawOp`]s per
//! [`Page`]. Headers and footers are not part of the block list: a
//! [`PageDecorator`] is called once per finished page to draw them.
//!
//! All coordinates are PDF points with the origin at the bottom-left corner.

use std::ops::Range;
use std::path::PathBuf;

use crate::text::{text_width, wrap_text};

/// Points per inch.
pub const INCH: f32 = 72.0;

/// An opaque RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Color {
    /// Black.
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    /// White.
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    /// Header text on colored header rows.
    pub const WHITESMOKE: Self = Self::rgb(245, 245, 245);
    /// Alternate body row fill.
    pub const LIGHT_GREY: Self = Self::rgb(211, 211, 211);
    /// Footer caption.
    pub const GREY: Self = Self::rgb(128, 128, 128);

    /// Create a color from 8-bit channels.
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Channels scaled to `0.0..=1.0`.
    #[must_use]
    pub fn unit(self) -> (f32, f32, f32) {
        (
            f32::from(self.r) / 255.0,
            f32::from(self.g) / 255.0,
            f32::from(self.b) / 255.0,
        )
    }
}

/// The two built-in faces the report uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Font {
    /// Helvetica.
    Regular,
    /// Helvetica-Bold.
    Bold,
}

/// Horizontal alignment of text within its box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    /// Flush left.
    #[default]
    Left,
    /// Centered.
    Center,
    /// Flush right.
    Right,
}

/// Page size and margins.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    /// Page width.
    pub width: f32,
    /// Page height.
    pub height: f32,
    /// Left margin.
    pub margin_left: f32,
    /// Right margin.
    pub margin_right: f32,
    /// Top margin, reserved for the page header.
    pub margin_top: f32,
    /// Bottom margin.
    pub margin_bottom: f32,
}

impl PageGeometry {
    /// US letter with 0.75in sides, 1.5in top and 1in bottom.
    #[must_use]
    pub fn letter() -> Self {
        Self {
            width: 8.5 * INCH,
            height: 11.0 * INCH,
            margin_left: 0.75 * INCH,
            margin_right: 0.75 * INCH,
            margin_top: 1.5 * INCH,
            margin_bottom: INCH,
        }
    }

    /// Left edge of the content frame.
    #[must_use]
    pub const fn frame_left(&self) -> f32 {
        self.margin_left
    }

    /// Width of the content frame.
    #[must_use]
    pub fn frame_width(&self) -> f32 {
        self.width - self.margin_left - self.margin_right
    }

    /// Top edge of the content frame.
    #[must_use]
    pub fn frame_top(&self) -> f32 {
        self.height - self.margin_top
    }

    /// Bottom edge of the content frame.
    #[must_use]
    pub const fn frame_bottom(&self) -> f32 {
        self.margin_bottom
    }
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self::letter()
    }
}

/// How a paragraph is set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParagraphStyle {
    /// Face.
    pub font: Font,
    /// Font size.
    pub size: f32,
    /// Baseline-to-baseline distance.
    pub leading: f32,
    /// Text color.
    pub color: Color,
    /// Space above, dropped at the top of a page.
    pub space_before: f32,
    /// Space below.
    pub space_after: f32,
    /// Alignment within the frame.
    pub align: Align,
}

impl ParagraphStyle {
    /// Body text: 10pt Helvetica.
    #[must_use]
    pub const fn normal() -> Self {
        Self {
            font: Font::Regular,
            size: 10.0,
            leading: 12.0,
            color: Color::BLACK,
            space_before: 0.0,
            space_after: 0.0,
            align: Align::Left,
        }
    }
}

/// A table column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Column {
    /// Column width.
    pub width: f32,
    /// Alignment of header and body cells.
    pub align: Align,
}

impl Column {
    /// Left-aligned column of `inches` width.
    #[must_use]
    pub fn left(inches: f32) -> Self {
        Self {
            width: inches * INCH,
            align: Align::Left,
        }
    }

    /// Right-aligned column of `inches` width.
    #[must_use]
    pub fn right(inches: f32) -> Self {
        Self {
            width: inches * INCH,
            align: Align::Right,
        }
    }
}

/// Visual style of a table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableStyle {
    /// Header row background.
    pub header_fill: Color,
    /// Header row text color.
    pub header_text: Color,
    /// Header font size (bold).
    pub header_size: f32,
    /// Body font size.
    pub body_size: f32,
    /// Extra padding below header text.
    pub header_bottom_padding: f32,
    /// Alternating body row backgrounds.
    pub row_fills: [Color; 2],
    /// Grid line color.
    pub grid: Color,
    /// Grid line width.
    pub grid_width: f32,
}

impl TableStyle {
    /// Default style with the given header color and font sizes.
    #[must_use]
    pub const fn new(header_fill: Color, header_size: f32, body_size: f32) -> Self {
        Self {
            header_fill,
            header_text: Color::WHITESMOKE,
            header_size,
            body_size,
            header_bottom_padding: 12.0,
            row_fills: [Color::WHITE, Color::LIGHT_GREY],
            grid: Color::BLACK,
            grid_width: 1.0,
        }
    }
}

/// A table: one header row followed by body rows.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    /// Column widths and alignment.
    pub columns: Vec<Column>,
    /// Header labels.
    pub header: Vec<String>,
    /// Body cells, one `Vec` per row.
    pub rows: Vec<Vec<String>>,
    /// Colors and sizes.
    pub style: TableStyle,
}

impl Table {
    /// Total width of all columns.
    #[must_use]
    pub fn width(&self) -> f32 {
        self.columns.iter().map(|c| c.width).sum()
    }
}

/// A flowable unit of content.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    /// A (possibly wrapped) run of text.
    Paragraph {
        /// The text.
        text: String,
        /// How to set it.
        style: ParagraphStyle,
    },
    /// Vertical whitespace.
    Spacer(f32),
    /// A table.
    Table(Table),
    /// An image file drawn at a fixed size, centered.
    Image {
        /// PNG file.
        path: PathBuf,
        /// Drawn width.
        width: f32,
        /// Drawn height.
        height: f32,
    },
    /// Continue on a new page.
    PageBreak,
}

/// One positioned drawing operation.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    /// Text with its baseline starting at `(x, y)`.
    Text {
        /// Left end of the baseline.
        x: f32,
        /// Baseline height.
        y: f32,
        /// The text.
        text: String,
        /// Face.
        font: Font,
        /// Size.
        size: f32,
        /// Fill color.
        color: Color,
    },
    /// A filled rectangle with lower-left corner `(x, y)`.
    FillRect {
        /// Left edge.
        x: f32,
        /// Bottom edge.
        y: f32,
        /// Width.
        width: f32,
        /// Height.
        height: f32,
        /// Fill color.
        color: Color,
    },
    /// A straight stroke.
    Line {
        /// Start point.
        from: (f32, f32),
        /// End point.
        to: (f32, f32),
        /// Stroke width.
        width: f32,
        /// Stroke color.
        color: Color,
    },
    /// An image with lower-left corner `(x, y)`.
    Image {
        /// PNG file.
        path: PathBuf,
        /// Left edge.
        x: f32,
        /// Bottom edge.
        y: f32,
        /// Drawn width.
        width: f32,
        /// Drawn height.
        height: f32,
        /// When false, a file that cannot be decoded is skipped instead of
        /// failing the document.
        required: bool,
    },
}

impl DrawOp {
    /// Text op positioned by alignment against `anchor_x`.
    ///
    /// `Left` starts at the anchor, `Center` centers on it and `Right` ends
    /// at it.
    #[must_use]
    pub fn aligned_text(
        text: impl Into<String>,
        align: Align,
        anchor_x: f32,
        y: f32,
        font: Font,
        size: f32,
        color: Color,
    ) -> Self {
        let text = text.into();
        let width = text_width(&text, font, size);
        let x = match align {
            Align::Left => anchor_x,
            Align::Center => anchor_x - width / 2.0,
            Align::Right => anchor_x - width,
        };
        Self::Text {
            x,
            y,
            text,
            font,
            size,
            color,
        }
    }
}

/// A laid-out page.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    /// 1-based page number.
    pub number: usize,
    /// Page size.
    pub geometry: PageGeometry,
    /// Drawing operations in paint order.
    pub ops: Vec<DrawOp>,
}

impl Page {
    /// All text strings on the page, in paint order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    /// True when some text op equals `needle`.
    #[must_use]
    pub fn has_text(&self, needle: &str) -> bool {
        self.texts().any(|t| t == needle)
    }

    /// Number of image ops on the page.
    #[must_use]
    pub fn image_count(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, DrawOp::Image { .. }))
            .count()
    }
}

/// Draws the per-page furniture (header, footer, page numbers).
pub trait PageDecorator {
    /// Operations to paint beneath the content of page `page_number`.
    fn decorate(&self, page_number: usize, geometry: &PageGeometry) -> Vec<DrawOp>;
}

impl<F> PageDecorator for F
where
    F: Fn(usize, &PageGeometry) -> Vec<DrawOp>,
{
    fn decorate(&self, page_number: usize, geometry: &PageGeometry) -> Vec<DrawOp> {
        self(page_number, geometry)
    }
}

/// Horizontal cell padding.
const CELL_PAD_X: f32 = 6.0;
/// Vertical cell padding.
const CELL_PAD_Y: f32 = 3.0;

struct Paginator {
    geometry: PageGeometry,
    pages: Vec<Vec<DrawOp>>,
    current: Vec<DrawOp>,
    cursor: f32,
    has_content: bool,
}

impl Paginator {
    fn new(geometry: PageGeometry) -> Self {
        Self {
            geometry,
            pages: Vec::new(),
            current: Vec::new(),
            cursor: geometry.frame_top(),
            has_content: false,
        }
    }

    fn available(&self) -> f32 {
        self.cursor - self.geometry.frame_bottom()
    }

    fn new_page(&mut self) {
        self.pages.push(std::mem::take(&mut self.current));
        self.cursor = self.geometry.frame_top();
        self.has_content = false;
    }

    /// Start a new page if `height` does not fit and this page is not empty.
    fn ensure_room(&mut self, height: f32) {
        if height > self.available() && self.has_content {
            self.new_page();
        }
    }

    fn place(&mut self, block: &Block) {
        match block {
            Block::Paragraph { text, style } => self.place_paragraph(text, style),
            Block::Spacer(height) => {
                if *height > self.available() {
                    if self.has_content {
                        self.new_page();
                    }
                } else {
                    self.cursor -= height;
                }
            }
            Block::Table(table) => self.place_table(table),
            Block::Image {
                path,
                width,
                height,
            } => {
                self.ensure_room(*height);
                let x = self.geometry.frame_left() + (self.geometry.frame_width() - width) / 2.0;
                self.cursor -= height;
                self.current.push(DrawOp::Image {
                    path: path.clone(),
                    x,
                    y: self.cursor,
                    width: *width,
                    height: *height,
                    required: true,
                });
                self.has_content = true;
            }
            Block::PageBreak => {
                if self.has_content {
                    self.new_page();
                }
            }
        }
    }

    fn place_paragraph(&mut self, text: &str, style: &ParagraphStyle) {
        if self.has_content {
            self.cursor -= style.space_before;
        }
        let frame_width = self.geometry.frame_width();
        let anchor = match style.align {
            Align::Left => self.geometry.frame_left(),
            Align::Center => self.geometry.frame_left() + frame_width / 2.0,
            Align::Right => self.geometry.frame_left() + frame_width,
        };

        for line in wrap_text(text, style.font, style.size, frame_width) {
            self.ensure_room(style.leading);
            let baseline = self.cursor - style.size;
            self.current.push(DrawOp::aligned_text(
                line,
                style.align,
                anchor,
                baseline,
                style.font,
                style.size,
                style.color,
            ));
            self.cursor -= style.leading;
            self.has_content = true;
        }
        self.cursor -= style.space_after;
    }

    fn place_table(&mut self, table: &Table) {
        let left = self.geometry.frame_left() + (self.geometry.frame_width() - table.width()) / 2.0;

        self.place_row(table, left, &table.header, RowKind::Header);
        for (index, row) in table.rows.iter().enumerate() {
            self.place_row(table, left, row, RowKind::Body(index));
        }
    }

    fn place_row(&mut self, table: &Table, left: f32, cells: &[String], kind: RowKind) {
        let look = RowLook::new(&table.style, kind);

        let wrapped: Vec<Vec<String>> = table
            .columns
            .iter()
            .enumerate()
            .map(|(i, column)| {
                let text = cells.get(i).map_or("", String::as_str);
                wrap_text(text, look.font, look.size, column.width - 2.0 * CELL_PAD_X)
            })
            .collect();
        let line_count = wrapped.iter().map(Vec::len).max().unwrap_or(0).max(1);
        let frame_height = self.geometry.frame_top() - self.geometry.frame_bottom();

        // A row that fits on a fresh page is moved there whole. Taller rows
        // are split at line boundaries and continue on the following pages.
        let mut first = 0;
        while first < line_count {
            let remaining = line_count - first;
            let fitting = self.lines_fitting(&look);
            let movable = look.height(remaining) <= frame_height || fitting == 0;
            if fitting < remaining && movable && self.has_content {
                self.new_page();
                continue;
            }
            let last = first + remaining.min(fitting.max(1));
            self.place_row_lines(table, left, &wrapped, first..last, &look);
            first = last;
        }
    }

    /// Row lines that fit in the space left on this page.
    fn lines_fitting(&self, look: &RowLook) -> usize {
        let room = self.available() - CELL_PAD_Y - look.bottom_pad + 1e-3;
        if room <= 0.0 {
            0
        } else {
            (room / look.leading()).floor() as usize
        }
    }

    fn place_row_lines(
        &mut self,
        table: &Table,
        left: f32,
        wrapped: &[Vec<String>],
        lines: Range<usize>,
        look: &RowLook,
    ) {
        let style = &table.style;
        let height = look.height(lines.len());
        let top = self.cursor;
        let bottom = top - height;
        let width = table.width();

        self.current.push(DrawOp::FillRect {
            x: left,
            y: bottom,
            width,
            height,
            color: look.fill,
        });

        let mut x = left;
        for (column, cell) in table.columns.iter().zip(wrapped) {
            let anchor = match column.align {
                Align::Left => x + CELL_PAD_X,
                Align::Center => x + column.width / 2.0,
                Align::Right => x + column.width - CELL_PAD_X,
            };
            let mut baseline = top - CELL_PAD_Y - look.size;
            for line in cell.iter().skip(lines.start).take(lines.len()) {
                if !line.is_empty() {
                    self.current.push(DrawOp::aligned_text(
                        line.clone(),
                        column.align,
                        anchor,
                        baseline,
                        look.font,
                        look.size,
                        look.text_color,
                    ));
                }
                baseline -= look.leading();
            }
            x += column.width;
        }

        let grid = |from: (f32, f32), to: (f32, f32)| DrawOp::Line {
            from,
            to,
            width: style.grid_width,
            color: style.grid,
        };
        self.current.push(grid((left, top), (left + width, top)));
        self.current.push(grid((left, bottom), (left + width, bottom)));
        let mut edge = left;
        self.current.push(grid((edge, top), (edge, bottom)));
        for column in &table.columns {
            edge += column.width;
            self.current.push(grid((edge, top), (edge, bottom)));
        }

        self.cursor = bottom;
        self.has_content = true;
    }

    fn finish(mut self, decorator: &dyn PageDecorator) -> Vec<Page> {
        if self.has_content || self.pages.is_empty() {
            self.pages.push(std::mem::take(&mut self.current));
        }
        let geometry = self.geometry;
        self.pages
            .into_iter()
            .enumerate()
            .map(|(index, content)| {
                let number = index + 1;
                let mut ops = decorator.decorate(number, &geometry);
                ops.extend(content);
                Page {
                    number,
                    geometry,
                    ops,
                }
            })
            .collect()
    }
}

#[derive(Debug, Clone, Copy)]
enum RowKind {
    Header,
    Body(usize),
}

/// Font and padding of one table row.
struct RowLook {
    font: Font,
    size: f32,
    text_color: Color,
    fill: Color,
    bottom_pad: f32,
}

impl RowLook {
    fn new(style: &TableStyle, kind: RowKind) -> Self {
        match kind {
            RowKind::Header => Self {
                font: Font::Bold,
                size: style.header_size,
                text_color: style.header_text,
                fill: style.header_fill,
                bottom_pad: style.header_bottom_padding,
            },
            RowKind::Body(index) => Self {
                font: Font::Regular,
                size: style.body_size,
                text_color: Color::BLACK,
                fill: style.row_fills[index % 2],
                bottom_pad: CELL_PAD_Y,
            },
        }
    }

    fn leading(&self) -> f32 {
        self.size * 1.2
    }

    /// Height of a row segment holding `lines` lines.
    fn height(&self, lines: usize) -> f32 {
        CELL_PAD_Y + lines as f32 * self.leading() + self.bottom_pad
    }
}

/// Flow `blocks` onto pages and decorate each page.
///
/// Always returns at least one page. A page break on a page with no content
/// yet is ignored, and a trailing empty page is dropped.
#[must_use]
pub fn paginate(
    blocks: &[Block],
    geometry: &PageGeometry,
    decorator: &dyn PageDecorator,
) -> Vec<Page> {
    let mut paginator = Paginator::new(*geometry);
    for block in blocks {
        paginator.place(block);
    }
    paginator.finish(decorator)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_decoration(_: usize, _: &PageGeometry) -> Vec<DrawOp> {
        Vec::new()
    }

    fn para(text: &str) -> Block {
        Block::Paragraph {
            text: text.to_string(),
            style: ParagraphStyle::normal(),
        }
    }

    fn table(rows: usize) -> Table {
        Table {
            columns: vec![Column::left(2.0), Column::right(1.0)],
            header: vec!["Name".into(), "Amount".into()],
            rows: (0..rows)
                .map(|i| vec![format!("row {i}"), format!("{i}.00")])
                .collect(),
            style: TableStyle::new(Color::rgb(0x34, 0x49, 0x5e), 11.0, 9.0),
        }
    }

    #[test]
    fn test_letter_frame() {
        let g = PageGeometry::letter();
        assert!((g.frame_width() - 7.0 * INCH).abs() < f32::EPSILON);
        assert!((g.frame_top() - 9.5 * INCH).abs() < f32::EPSILON);
        assert!((g.frame_bottom() - INCH).abs() < f32::EPSILON);
    }

    #[test]
    fn test_page_breaks() {
        let blocks = vec![para("one"), Block::PageBreak, para("two")];
        let pages = paginate(&blocks, &PageGeometry::letter(), &no_decoration);

        assert_eq!(pages.len(), 2);
        assert!(pages[0].has_text("one"));
        assert!(pages[1].has_text("two"));
        assert_eq!(pages[1].number, 2);
    }

    #[test]
    fn test_leading_and_trailing_breaks_do_not_add_pages() {
        let blocks = vec![Block::PageBreak, para("only"), Block::PageBreak, Block::PageBreak];
        let pages = paginate(&blocks, &PageGeometry::letter(), &no_decoration);

        assert_eq!(pages.len(), 1);
    }

    #[test]
    fn test_empty_document_has_one_page() {
        let pages = paginate(&[], &PageGeometry::letter(), &no_decoration);
        assert_eq!(pages.len(), 1);
        assert!(pages[0].ops.is_empty());
    }

    #[test]
    fn test_long_table_splits_between_rows() {
        let blocks = vec![Block::Table(table(200))];
        let pages = paginate(&blocks, &PageGeometry::letter(), &no_decoration);

        assert!(pages.len() > 1);
        assert!(pages[0].has_text("Name"));
        // Header is not repeated on continuation pages.
        assert!(!pages[1].has_text("Name"));
        assert!(pages.last().unwrap().has_text("row 199"));

        let bottom = PageGeometry::letter().frame_bottom();
        for page in &pages {
            for op in &page.ops {
                if let DrawOp::FillRect { y, .. } = op {
                    assert!(*y >= bottom - 0.01, "row below frame on page {}", page.number);
                }
            }
        }
    }

    #[test]
    fn test_tall_row_continues_on_next_pages() {
        let words: Vec<String> = (0..1500).map(|i| format!("w{i}")).collect();
        let mut tall = table(1);
        tall.rows.push(vec![words.join(" "), "5.00".into()]);
        let pages = paginate(&[Block::Table(tall)], &PageGeometry::letter(), &no_decoration);

        assert!(pages.len() > 1);
        let bottom = PageGeometry::letter().frame_bottom();
        for page in &pages {
            for op in &page.ops {
                match op {
                    DrawOp::Text { y, .. } | DrawOp::FillRect { y, .. } => {
                        assert!(*y >= bottom - 0.01, "drawn below frame on page {}", page.number);
                    }
                    _ => {}
                }
            }
        }

        // Every word is drawn exactly once, in order.
        let drawn: Vec<&str> = pages
            .iter()
            .flat_map(Page::texts)
            .flat_map(str::split_whitespace)
            .filter(|w| w.starts_with('w'))
            .collect();
        assert_eq!(drawn, words.iter().map(String::as_str).collect::<Vec<_>>());
        assert!(pages[0].has_text("row 0"));
        assert!(pages[0].has_text("5.00"));
    }

    #[test]
    fn test_row_that_fits_a_fresh_page_is_not_split() {
        let g = PageGeometry::letter();
        // Fill most of the first page, then add a row about half a page tall.
        let filler = Block::Spacer(g.frame_top() - g.frame_bottom() - 100.0);
        let words: Vec<String> = (0..150).map(|i| format!("w{i}")).collect();
        let mut medium = table(0);
        medium.rows.push(vec![words.join(" "), "1.00".into()]);

        let pages = paginate(
            &[para("start"), filler, Block::Table(medium)],
            &g,
            &no_decoration,
        );

        assert_eq!(pages.len(), 2);
        assert!(pages[0].has_text("Name"));
        assert!(!pages[0].texts().any(|t| t.starts_with("w0 ")));
        assert!(pages[1].texts().any(|t| t.starts_with("w0 ")));
        assert!(pages[1].texts().any(|t| t.ends_with("w149")));
    }

    #[test]
    fn test_table_is_centered_and_amounts_right_aligned() {
        let blocks = vec![Block::Table(table(1))];
        let pages = paginate(&blocks, &PageGeometry::letter(), &no_decoration);
        let g = PageGeometry::letter();
        let expected_left = g.frame_left() + (g.frame_width() - 3.0 * INCH) / 2.0;

        let first_fill = pages[0]
            .ops
            .iter()
            .find_map(|op| match op {
                DrawOp::FillRect { x, .. } => Some(*x),
                _ => None,
            })
            .unwrap();
        assert!((first_fill - expected_left).abs() < 0.01);

        let amount_right_edge = pages[0]
            .ops
            .iter()
            .find_map(|op| match op {
                DrawOp::Text { x, text, font, size, .. } if text == "0.00" => {
                    Some(*x + text_width(text, *font, *size))
                }
                _ => None,
            })
            .unwrap();
        let column_right = expected_left + 3.0 * INCH - CELL_PAD_X;
        assert!((amount_right_edge - column_right).abs() < 0.01);
    }

    #[test]
    fn test_body_rows_alternate_fill() {
        let blocks = vec![Block::Table(table(3))];
        let pages = paginate(&blocks, &PageGeometry::letter(), &no_decoration);
        let fills: Vec<Color> = pages[0]
            .ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::FillRect { color, .. } => Some(*color),
                _ => None,
            })
            .collect();

        assert_eq!(
            fills,
            vec![
                Color::rgb(0x34, 0x49, 0x5e),
                Color::WHITE,
                Color::LIGHT_GREY,
                Color::WHITE
            ]
        );
    }

    #[test]
    fn test_image_moves_to_next_page_when_it_does_not_fit() {
        let blocks = vec![
            Block::Spacer(8.0 * INCH),
            para("filler"),
            Block::Image {
                path: PathBuf::from("chart.png"),
                width: 5.0 * INCH,
                height: 3.75 * INCH,
            },
        ];
        let pages = paginate(&blocks, &PageGeometry::letter(), &no_decoration);

        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].image_count(), 0);
        assert_eq!(pages[1].image_count(), 1);
    }

    #[test]
    fn test_decorator_runs_once_per_page() {
        let decorate = |n: usize, _: &PageGeometry| {
            vec![DrawOp::aligned_text(
                format!("page {n}"),
                Align::Center,
                306.0,
                36.0,
                Font::Regular,
                9.0,
                Color::GREY,
            )]
        };
        let blocks = vec![para("a"), Block::PageBreak, para("b"), Block::PageBreak, para("c")];
        let pages = paginate(&blocks, &PageGeometry::letter(), &decorate);

        assert_eq!(pages.len(), 3);
        for page in &pages {
            let label = format!("page {}", page.number);
            assert_eq!(page.texts().filter(|t| *t == label).count(), 1);
        }
    }
}
