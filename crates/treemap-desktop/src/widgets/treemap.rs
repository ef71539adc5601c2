use eframe::egui::{pos2, vec2, Color32, FontId, Painter, Pos2, Rect, Response, Sense, Ui, Vec2};
use treemap_data::{TreeData, TreeNode};

/// Display configuration for [`ui`].
#[derive(Debug, Clone, PartialEq)]
pub struct TreemapStyle {
    /// Fixed size of the chart. Fills the available space when `None`.
    pub size: Option<Vec2>,
    pub padding: f32,
    pub header_height: f32,
    pub rounding: f32,
    palette: Vec<Color32>,
}

impl Default for TreemapStyle {
    fn default() -> Self {
        Self {
            size: None,
            padding: 2.0,
            header_height: 18.0,
            rounding: 2.0,
            palette: vec![
                Color32::from_rgb(0x99, 0x1f, 0x29),
                Color32::from_rgb(0xf2, 0x36, 0x45),
                Color32::from_rgb(0xf7, 0x7c, 0x80),
                Color32::from_rgb(0xc1, 0xc4, 0xcd),
                Color32::from_rgb(0x42, 0xbd, 0x7f),
                Color32::from_rgb(0x08, 0x99, 0x50),
                Color32::from_rgb(0x05, 0x66, 0x36),
            ],
        }
    }
}

impl TreemapStyle {
    /// `None` for an empty palette.
    #[must_use]
    pub fn with_palette(self, palette: Vec<Color32>) -> Option<Self> {
        if palette.is_empty() {
            None
        } else {
            Some(Self { palette, ..self })
        }
    }

    #[must_use]
    pub fn color(&self, index: usize) -> Color32 {
        self.palette[index % self.palette.len()]
    }
}

pub fn ui(ui: &mut Ui, nodes: &[TreeNode], style: &TreemapStyle) -> Response {
    let size = style.size.unwrap_or_else(|| ui.available_size());
    let (response, painter) = ui.allocate_painter(size, Sense::hover());

    let mut cells = Cells {
        painter: &painter,
        style,
        header_height: header_height(style, nodes, response.rect.height()),
        pointer: response.hover_pos(),
        path: Vec::new(),
        hovered: None,
    };
    cells.paint(nodes, response.rect, 0);

    match cells.hovered {
        Some(hovered) => response.on_hover_text_at_pointer(hovered),
        None => response,
    }
}

struct Cells<'a> {
    painter: &'a Painter,
    style: &'a TreemapStyle,
    header_height: f32,
    pointer: Option<Pos2>,
    path: Vec<&'a str>,
    hovered: Option<String>,
}

impl<'a> Cells<'a> {
    // Colors cycle through the palette by sibling index, offset by the parent's.
    fn paint(&mut self, nodes: &'a [TreeNode], bounds: Rect, color_offset: usize) {
        let weights = nodes.iter().map(TreeNode::weight).collect::<Vec<_>>();
        let cells = squarify(&weights, bounds);

        for (index, (node, cell)) in nodes.iter().zip(cells).enumerate() {
            let cell = cell.shrink(self.style.padding);
            if !cell.is_positive() {
                continue;
            }

            let color_index = color_offset + index;
            let fill = self.style.color(color_index);
            self.path.push(&node.key);

            if self.pointer.is_some_and(|pointer| cell.contains(pointer)) {
                self.hovered = Some(format!("{}: {}", self.path.join(" / "), node.weight()));
            }

            match &node.data {
                TreeData::Leaf(_) => {
                    self.painter.rect_filled(cell, self.style.rounding, fill);
                    self.label(&node.key, cell, fill);
                }
                TreeData::Branch(children) => {
                    let header_fill = fill.gamma_multiply(0.6);
                    self.painter.rect_filled(cell, self.style.rounding, header_fill);

                    let header_height = self.header_height.min(cell.height());
                    let header = Rect::from_min_size(cell.min, vec2(cell.width(), header_height));
                    self.label(&node.key, header, header_fill);

                    let body = Rect::from_min_max(pos2(cell.min.x, header.max.y), cell.max);
                    self.paint(children, body, color_index);
                }
            }

            self.path.pop();
        }
    }

    fn label(&self, text: &str, cell: Rect, fill: Color32) {
        let color = text_color(fill);
        let galley = self
            .painter
            .layout_no_wrap(text.to_string(), FontId::proportional(12.0), color);
        let margin = vec2(4.0, 2.0);
        if galley.size().x + 2.0 * margin.x <= cell.width()
            && galley.size().y + 2.0 * margin.y <= cell.height()
        {
            self.painter.galley(cell.min + margin, galley, color);
        }
    }
}

// Nested headers stack up, so together they may take at most half the height.
#[allow(clippy::cast_precision_loss)]
fn header_height(style: &TreemapStyle, nodes: &[TreeNode], height: f32) -> f32 {
    let headers = nodes
        .iter()
        .map(|node| node.depth() - 1)
        .max()
        .unwrap_or_default();
    if headers == 0 {
        return style.header_height;
    }
    style.header_height.min(height / (2.0 * headers as f32))
}

fn text_color(fill: Color32) -> Color32 {
    let luma =
        0.299 * f32::from(fill.r()) + 0.587 * f32::from(fill.g()) + 0.114 * f32::from(fill.b());
    if luma > 150.0 {
        Color32::BLACK
    } else {
        Color32::WHITE
    }
}

/// Squarified treemap layout: splits `bounds` into one rectangle per weight
/// with area proportional to it, keeping aspect ratios close to 1.
///
/// The result is index-aligned with `weights`; non-positive weights get
/// [`Rect::NOTHING`].
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn squarify(weights: &[f64], bounds: Rect) -> Vec<Rect> {
    let mut cells = vec![Rect::NOTHING; weights.len()];

    let total: f64 = weights.iter().filter(|weight| **weight > 0.0).sum();
    let area = f64::from(bounds.width()) * f64::from(bounds.height());
    if total <= 0.0 || !bounds.is_positive() {
        return cells;
    }

    let mut order = (0..weights.len())
        .filter(|index| weights[*index] > 0.0)
        .collect::<Vec<_>>();
    order.sort_by(|a, b| weights[*b].total_cmp(&weights[*a]));

    let scale = area / total;
    let mut free = bounds;
    let mut row: Vec<(usize, f64)> = Vec::new();
    let mut queue = order.into_iter().map(|index| (index, weights[index] * scale)).peekable();

    while let Some(&(index, cell_area)) = queue.peek() {
        let side = f64::from(free.width().min(free.height()));
        let extends_well = row.is_empty() || {
            let mut extended = row.clone();
            extended.push((index, cell_area));
            worst_ratio(&extended, side) <= worst_ratio(&row, side)
        };

        if extends_well {
            row.push((index, cell_area));
            queue.next();
        } else {
            free = lay_out_row(&row, free, &mut cells);
            row.clear();
        }
    }
    if !row.is_empty() {
        lay_out_row(&row, free, &mut cells);
    }

    cells
}

fn worst_ratio(row: &[(usize, f64)], side: f64) -> f64 {
    let sum: f64 = row.iter().map(|(_, area)| area).sum();
    let (min, max) = row
        .iter()
        .fold((f64::INFINITY, 0.0_f64), |(min, max), (_, area)| {
            (min.min(*area), max.max(*area))
        });
    let side = side * side;
    let sum = sum * sum;
    (side * max / sum).max(sum / (side * min))
}

// Places the row along the shorter side of `free` and returns what is left.
#[allow(clippy::cast_possible_truncation)]
fn lay_out_row(row: &[(usize, f64)], free: Rect, cells: &mut [Rect]) -> Rect {
    let sum: f64 = row.iter().map(|(_, area)| area).sum();

    if free.width() >= free.height() {
        let thickness = (sum / f64::from(free.height())) as f32;
        let mut y = free.min.y;
        for (index, area) in row {
            let height = (area / f64::from(thickness)) as f32;
            cells[*index] = Rect::from_min_size(pos2(free.min.x, y), vec2(thickness, height));
            y += height;
        }
        Rect::from_min_max(pos2(free.min.x + thickness, free.min.y), free.max)
    } else {
        let thickness = (sum / f64::from(free.width())) as f32;
        let mut x = free.min.x;
        for (index, area) in row {
            let width = (area / f64::from(thickness)) as f32;
            cells[*index] = Rect::from_min_size(pos2(x, free.min.y), vec2(width, thickness));
            x += width;
        }
        Rect::from_min_max(pos2(free.min.x, free.min.y + thickness), free.max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds() -> Rect {
        Rect::from_min_size(pos2(10.0, 20.0), vec2(400.0, 600.0))
    }

    fn area(rect: &Rect) -> f32 {
        rect.width() * rect.height()
    }

    #[test]
    fn cells_fill_bounds_proportionally() {
        let weights = [20.0, 30.0, 10.0, 20.0, 30.0, 10.0];
        let cells = squarify(&weights, bounds());
        let total: f64 = weights.iter().sum();

        for (weight, cell) in weights.iter().zip(&cells) {
            assert!(bounds().expand(0.01).contains_rect(*cell), "{cell:?} escapes");
            #[allow(clippy::cast_possible_truncation)]
            let expected = (weight / total) as f32 * area(&bounds());
            assert!((area(cell) - expected).abs() < 1.0, "{cell:?} != {expected}");
        }

        let covered: f32 = cells.iter().map(area).sum();
        assert!((covered - area(&bounds())).abs() < 1.0);
    }

    #[test]
    fn cells_do_not_overlap() {
        let cells = squarify(&[40.0, 15.0, 20.0, 35.0, 15.0, 40.0, 15.0, 13.0, 19.0], bounds());
        for (i, a) in cells.iter().enumerate() {
            for b in &cells[i + 1..] {
                let overlap = a.intersect(*b);
                assert!(
                    !overlap.is_positive() || area(&overlap) < 0.01,
                    "{a:?} overlaps {b:?}"
                );
            }
        }
    }

    #[test]
    fn non_positive_weights_get_no_cell() {
        let cells = squarify(&[0.0, 60.0, -5.0], bounds());
        assert_eq!(cells[0], Rect::NOTHING);
        assert_eq!(cells[2], Rect::NOTHING);
        assert!((area(&cells[1]) - area(&bounds())).abs() < 1.0);
    }

    #[test]
    fn empty_input_or_bounds() {
        assert!(squarify(&[], bounds()).is_empty());
        let cells = squarify(&[1.0], Rect::from_min_size(Pos2::ZERO, Vec2::ZERO));
        assert_eq!(cells, vec![Rect::NOTHING]);
    }

    #[test]
    fn palette_cycles_and_must_not_be_empty() {
        let style = TreemapStyle::default();
        assert_eq!(style.color(7), style.color(0));
        assert_ne!(style.color(1), style.color(0));
        assert!(TreemapStyle::default().with_palette(vec![]).is_none());
        let single = TreemapStyle::default()
            .with_palette(vec![Color32::RED])
            .unwrap();
        assert_eq!(single.color(3), Color32::RED);
    }

    #[test]
    fn deep_trees_get_thinner_headers() {
        let style = TreemapStyle::default();
        let flat = [TreeNode::leaf("AccNo1", 20.0)];
        let nested = [TreeNode::branch(
            "ENGLAND",
            vec![TreeNode::branch(
                "AccNo1",
                vec![TreeNode::branch("Q1", vec![TreeNode::leaf("AccNo8", 15.0)])],
            )],
        )];

        assert!((header_height(&style, &flat, 30.0) - 18.0).abs() < f32::EPSILON);
        assert!((header_height(&style, &nested, 600.0) - 18.0).abs() < f32::EPSILON);
        assert!((header_height(&style, &nested, 60.0) - 10.0).abs() < f32::EPSILON);
    }

    #[test]
    fn label_color_contrasts_with_fill() {
        assert_eq!(text_color(Color32::from_rgb(0xc1, 0xc4, 0xcd)), Color32::BLACK);
        assert_eq!(text_color(Color32::from_rgb(0x05, 0x66, 0x36)), Color32::WHITE);
    }
}
