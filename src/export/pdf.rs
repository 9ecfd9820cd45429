use pdf_writer::{Content, Name, Pdf, Rect, Ref};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Minimal multi-page table writer on top of `pdf-writer`. Pages are A4
/// landscape, which fits the wide punch rows.
pub struct PdfTable {
    pdf: Pdf,
    catalog_id: Ref,
    pages_id: Ref,
    font_id: Ref,
    page_refs: Vec<Ref>,
    next_id: i32,

    page_w: f32,
    page_h: f32,
    margin: f32,
    row_h: f32,

    font_size: f32,
    header_font_size: f32,
    title_font_size: f32,
}

impl Default for PdfTable {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfTable {
    pub fn new() -> Self {
        let mut pdf = Pdf::new();

        // Object ids are handed out manually, starting after the three
        // fixed objects below.
        let catalog_id = Ref::new(1);
        let pages_id = Ref::new(2);
        let font_id = Ref::new(3);

        pdf.type1_font(font_id).base_font(Name(b"Helvetica"));

        Self {
            pdf,
            catalog_id,
            pages_id,
            font_id,
            page_refs: Vec::new(),
            next_id: 4,

            // A4 landscape
            page_w: 842.0,
            page_h: 595.0,
            margin: 40.0,
            row_h: 18.0,

            font_size: 8.0,
            header_font_size: 9.0,
            title_font_size: 13.0,
        }
    }

    fn fresh_ref(&mut self) -> Ref {
        let id = self.next_id;
        self.next_id += 1;
        Ref::new(id)
    }

    /// Rows that fit under the title block of one page.
    fn rows_per_page(&self) -> usize {
        let usable = self.page_h - 2.0 * self.margin - 30.0 - self.row_h;
        (usable / self.row_h).max(1.0) as usize
    }

    fn draw_text(&self, content: &mut Content, x: f32, y: f32, size: f32, text: &str) {
        content.begin_text();
        content.set_font(Name(b"F1"), size);
        content.set_text_matrix([1.0, 0.0, 0.0, 1.0, x, y]);
        content.show(pdf_writer::Str(text.as_bytes()));
        content.end_text();
    }

    fn fill_band(&self, content: &mut Content, y: f32, width: f32, rgb: (f32, f32, f32)) {
        content.save_state();
        content.set_fill_rgb(rgb.0, rgb.1, rgb.2);
        content.rect(self.margin, y, width, self.row_h);
        content.fill_nonzero();
        content.restore_state();
    }

    fn draw_row(
        &self,
        content: &mut Content,
        y: f32,
        col_widths: &[f32],
        row: &[String],
        font_size: f32,
    ) {
        let mut x = self.margin;

        for (i, text) in row.iter().enumerate() {
            let w = col_widths[i];

            self.draw_text(content, x + 3.0, y + 5.0, font_size, text);

            content.save_state();
            content.set_stroke_rgb(0.65, 0.65, 0.65);
            content.rect(x, y, w, self.row_h);
            content.stroke();
            content.restore_state();

            x += w;
        }
    }

    /// Column widths scaled from header and content lengths to the usable
    /// page width.
    fn compute_col_widths(&self, headers: &[&str], rows: &[Vec<String>]) -> Vec<f32> {
        let mut widths: Vec<f32> = headers.iter().map(|h| h.len() as f32 * 6.0).collect();

        for row in rows {
            for (i, cell) in row.iter().enumerate() {
                widths[i] = widths[i].max(cell.len() as f32 * 5.2);
            }
        }

        let total: f32 = widths.iter().sum();
        let max = self.page_w - 2.0 * self.margin;

        let scale = max / total;
        if scale < 1.0 {
            for w in &mut widths {
                *w *= scale;
            }
        }

        widths
    }

    /// Emit one page holding the title, the header row and `rows`.
    fn write_page(
        &mut self,
        title: &str,
        page_no: usize,
        headers: &[String],
        col_widths: &[f32],
        rows: &[Vec<String>],
    ) {
        let page_id = self.fresh_ref();
        let content_id = self.fresh_ref();
        self.page_refs.push(page_id);

        let mut page = self.pdf.page(page_id);
        page.parent(self.pages_id)
            .media_box(Rect::new(0.0, 0.0, self.page_w, self.page_h))
            .contents(content_id);
        page.resources().fonts().pair(Name(b"F1"), self.font_id);
        drop(page);

        let mut content = Content::new();
        let table_width: f32 = col_widths.iter().sum();

        self.draw_text(
            &mut content,
            self.margin,
            self.page_h - self.margin + 10.0,
            self.title_font_size,
            title,
        );
        self.draw_text(
            &mut content,
            self.page_w - self.margin - 50.0,
            self.margin - 25.0,
            self.font_size,
            &format!("Page {page_no}"),
        );

        let mut y = self.page_h - self.margin - 30.0;

        self.fill_band(&mut content, y, table_width, (0.85, 0.87, 0.90));
        self.draw_row(&mut content, y, col_widths, headers, self.header_font_size);
        y -= self.row_h;

        for (i, row) in rows.iter().enumerate() {
            if i % 2 == 0 {
                self.fill_band(&mut content, y, table_width, (0.96, 0.96, 0.96));
            }
            self.draw_row(&mut content, y, col_widths, row, self.font_size);
            y -= self.row_h;
        }

        self.pdf.stream(content_id, &content.finish());
    }

    /// Lay out the whole table, splitting rows across as many pages as
    /// needed. An empty dataset still produces a page with the header row.
    pub fn write_table(&mut self, title: &str, headers: &[&str], rows: &[Vec<String>]) {
        let col_widths = self.compute_col_widths(headers, rows);
        let header_row: Vec<String> = headers.iter().map(|s| s.to_string()).collect();
        let per_page = self.rows_per_page();

        if rows.is_empty() {
            self.write_page(title, 1, &header_row, &col_widths, &[]);
            return;
        }

        for (idx, chunk) in rows.chunks(per_page).enumerate() {
            self.write_page(title, idx + 1, &header_row, &col_widths, chunk);
        }
    }

    pub fn save(mut self, path: &Path) -> std::io::Result<()> {
        // Catalog and page tree are built once, at the end
        self.pdf.catalog(self.catalog_id).pages(self.pages_id);

        let mut pages = self.pdf.pages(self.pages_id);
        pages.count(self.page_refs.len() as i32);
        pages.kids(self.page_refs.clone());
        drop(pages);

        let bytes = self.pdf.finish();
        let mut f = File::create(path)?;
        f.write_all(&bytes)?;
        Ok(())
    }
}
