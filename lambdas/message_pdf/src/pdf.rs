use crate::validation::ValidatedMessage;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream};
use shared::time_bucket::TimeBucket;
use thiserror::Error;

#[cfg(test)]
use mockall::automock;

const POINTS_PER_MM: f32 = 72.0 / 25.4;
const FONT_NAME: &str = "F1";

#[derive(Debug, Error)]
pub(crate) enum RenderError {
    #[error("failed to build PDF: {0}")]
    Pdf(#[from] lopdf::Error),
    #[error("failed to write PDF: {0}")]
    Io(#[from] std::io::Error),
}

/// Page geometry in millimetres, measured from the top-left corner of the page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct PdfLayout {
    pub page_width: f32,
    pub page_height: f32,
    pub x: f32,
    pub message_y: f32,
    pub timestamp_y: f32,
    pub font_size: f32,
}

impl Default for PdfLayout {
    /// A4 portrait, Helvetica 16pt.
    fn default() -> Self {
        Self {
            page_width: 210.0,
            page_height: 297.0,
            x: 10.0,
            message_y: 10.0,
            timestamp_y: 20.0,
            font_size: 16.0,
        }
    }
}

impl PdfLayout {
    /// PDF user space starts at the bottom-left and is measured in points.
    fn to_points(&self, x: f32, y: f32) -> (f32, f32) {
        (x * POINTS_PER_MM, (self.page_height - y) * POINTS_PER_MM)
    }
}

#[cfg_attr(test, automock)]
pub(crate) trait DocumentRenderer {
    fn render(
        &self,
        message: &ValidatedMessage,
        timestamp: &TimeBucket,
    ) -> Result<Vec<u8>, RenderError>;
}

pub(crate) struct PdfRenderer {
    layout: PdfLayout,
}

impl PdfRenderer {
    pub fn new(layout: PdfLayout) -> Self {
        Self { layout }
    }

    fn text_line(&self, text: String, y: f32) -> Vec<Operation> {
        let (x, y) = self.layout.to_points(self.layout.x, y);
        vec![
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec![FONT_NAME.into(), self.layout.font_size.into()]),
            Operation::new("Td", vec![x.into(), y.into()]),
            Operation::new("Tj", vec![Object::string_literal(text)]),
            Operation::new("ET", vec![]),
        ]
    }

    fn add_page(
        &self,
        doc: &mut Document,
        pages_id: ObjectId,
        content: Content,
    ) -> Result<ObjectId, RenderError> {
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! {
                FONT_NAME => font_id,
            },
        });
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));
        let (width, height) = (
            self.layout.page_width * POINTS_PER_MM,
            self.layout.page_height * POINTS_PER_MM,
        );

        Ok(doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
            "MediaBox" => vec![0.0f32.into(), 0.0f32.into(), width.into(), height.into()],
        }))
    }
}

impl DocumentRenderer for PdfRenderer {
    /// Output depends only on the inputs, so one (message, bucket) pair always
    /// yields the same bytes.
    fn render(
        &self,
        message: &ValidatedMessage,
        timestamp: &TimeBucket,
    ) -> Result<Vec<u8>, RenderError> {
        let mut operations =
            self.text_line(format!("Message: {}", message.as_str()), self.layout.message_y);
        operations.extend(self.text_line(
            format!("Timestamp: {}", timestamp),
            self.layout.timestamp_y,
        ));

        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let page_id = self.add_page(&mut doc, pages_id, Content { operations })?;
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => vec![page_id.into()],
                "Count" => 1,
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut buffer = Vec::new();
        doc.save_to(&mut buffer)?;
        Ok(buffer)
    }
}
