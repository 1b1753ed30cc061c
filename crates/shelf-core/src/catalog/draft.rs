//! Edit buffer for the product form.

use std::fmt;

use super::product::Product;
use super::wire::{self, ProductPayload};

/// Maximum number of secondary image slots.
pub const MAX_IMAGE_SLOTS: usize = 5;

/// Text fields of the edit buffer, in form order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DraftField {
    Title,
    Category,
    Unit,
    OriginPrice,
    Price,
    ImageUrl,
    Description,
    Content,
}

impl DraftField {
    pub const ALL: [DraftField; 8] = [
        DraftField::Title,
        DraftField::Category,
        DraftField::Unit,
        DraftField::OriginPrice,
        DraftField::Price,
        DraftField::ImageUrl,
        DraftField::Description,
        DraftField::Content,
    ];

    pub fn label(self) -> &'static str {
        match self {
            DraftField::Title => "Title",
            DraftField::Category => "Category",
            DraftField::Unit => "Unit",
            DraftField::OriginPrice => "Origin price",
            DraftField::Price => "Price",
            DraftField::ImageUrl => "Main image URL",
            DraftField::Description => "Description",
            DraftField::Content => "Content",
        }
    }
}

/// One edit to the buffer.
#[derive(Debug, Clone, PartialEq)]
pub enum DraftEdit {
    SetText(DraftField, String),
    SetEnabled(bool),
    ToggleEnabled,
    SetImage { index: usize, url: String },
    AppendImage,
    RemoveImage,
}

/// Why an image-slot edit was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSlotRejection {
    /// A blank slot already exists.
    BlankSlot,
    /// All slots are in use.
    Full,
    /// Only one slot remains.
    LastSlot,
    /// No slot at that index.
    OutOfRange,
}

impl fmt::Display for ImageSlotRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageSlotRejection::BlankSlot => write!(f, "Fill the empty image slot first"),
            ImageSlotRejection::Full => {
                write!(f, "At most {MAX_IMAGE_SLOTS} image slots are allowed")
            }
            ImageSlotRejection::LastSlot => write!(f, "At least one image slot is required"),
            ImageSlotRejection::OutOfRange => write!(f, "No such image slot"),
        }
    }
}

/// Secondary image URLs. Always holds between 1 and [`MAX_IMAGE_SLOTS`] entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageSlots(Vec<String>);

impl Default for ImageSlots {
    fn default() -> Self {
        Self(vec![String::new()])
    }
}

impl ImageSlots {
    /// Builds slots from server data, padding an empty list to one blank slot
    /// and truncating past the maximum. Returns whether anything was dropped.
    pub fn from_urls(mut urls: Vec<String>) -> (Self, bool) {
        let truncated = urls.len() > MAX_IMAGE_SLOTS;
        urls.truncate(MAX_IMAGE_SLOTS);
        if urls.is_empty() {
            urls.push(String::new());
        }
        (Self(urls), truncated)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.0.get(index).map(String::as_str)
    }

    pub fn set(&mut self, index: usize, url: String) -> Result<(), ImageSlotRejection> {
        let slot = self
            .0
            .get_mut(index)
            .ok_or(ImageSlotRejection::OutOfRange)?;
        *slot = url;
        Ok(())
    }

    pub fn append(&mut self) -> Result<(), ImageSlotRejection> {
        if self.0.iter().any(|url| url.is_empty()) {
            return Err(ImageSlotRejection::BlankSlot);
        }
        if self.0.len() >= MAX_IMAGE_SLOTS {
            return Err(ImageSlotRejection::Full);
        }
        self.0.push(String::new());
        Ok(())
    }

    pub fn remove_last(&mut self) -> Result<(), ImageSlotRejection> {
        if self.0.len() <= 1 {
            return Err(ImageSlotRejection::LastSlot);
        }
        self.0.pop();
        Ok(())
    }

    pub fn into_vec(self) -> Vec<String> {
        self.0
    }
}

/// Why a draft failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationReason {
    Empty,
    NotANumber,
    Negative,
}

/// A buffer field that cannot be submitted as typed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationError {
    pub field: DraftField,
    pub reason: ValidationReason,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = self.field.label();
        match self.reason {
            ValidationReason::Empty => write!(f, "{label} is required"),
            ValidationReason::NotANumber => write!(f, "{label} must be a number"),
            ValidationReason::Negative => write!(f, "{label} must not be negative"),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Working copy of a product being created or edited.
///
/// Prices are held as typed text until submission.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProductDraft {
    /// `None` for a product that does not exist on the server yet.
    pub id: Option<String>,
    pub image_url: String,
    pub title: String,
    pub category: String,
    pub unit: String,
    pub origin_price: String,
    pub price: String,
    pub description: String,
    pub content: String,
    pub is_enabled: bool,
    pub images: ImageSlots,
}

impl ProductDraft {
    /// Copies a server product into an editable buffer.
    pub fn from_product(product: &Product) -> Self {
        let (images, truncated) = ImageSlots::from_urls(product.images_url.clone());
        if truncated {
            tracing::warn!(
                product_id = %product.id,
                count = product.images_url.len(),
                "product has more than {MAX_IMAGE_SLOTS} images; extra slots dropped"
            );
        }

        Self {
            id: Some(product.id.clone()),
            image_url: product.image_url.clone(),
            title: product.title.clone(),
            category: product.category.clone(),
            unit: product.unit.clone(),
            origin_price: format_price(product.origin_price),
            price: format_price(product.price),
            description: product.description.clone(),
            content: product.content.clone(),
            is_enabled: product.is_enabled,
            images,
        }
    }

    pub fn text(&self, field: DraftField) -> &str {
        match field {
            DraftField::Title => &self.title,
            DraftField::Category => &self.category,
            DraftField::Unit => &self.unit,
            DraftField::OriginPrice => &self.origin_price,
            DraftField::Price => &self.price,
            DraftField::ImageUrl => &self.image_url,
            DraftField::Description => &self.description,
            DraftField::Content => &self.content,
        }
    }

    fn text_mut(&mut self, field: DraftField) -> &mut String {
        match field {
            DraftField::Title => &mut self.title,
            DraftField::Category => &mut self.category,
            DraftField::Unit => &mut self.unit,
            DraftField::OriginPrice => &mut self.origin_price,
            DraftField::Price => &mut self.price,
            DraftField::ImageUrl => &mut self.image_url,
            DraftField::Description => &mut self.description,
            DraftField::Content => &mut self.content,
        }
    }

    /// Applies one edit. Rejected image edits leave the buffer unchanged.
    ///
    /// # Errors
    /// Returns the rejection reason for a refused image-slot edit.
    pub fn apply(&mut self, edit: DraftEdit) -> Result<(), ImageSlotRejection> {
        match edit {
            DraftEdit::SetText(field, value) => {
                *self.text_mut(field) = value;
                Ok(())
            }
            DraftEdit::SetEnabled(enabled) => {
                self.is_enabled = enabled;
                Ok(())
            }
            DraftEdit::ToggleEnabled => {
                self.is_enabled = !self.is_enabled;
                Ok(())
            }
            DraftEdit::SetImage { index, url } => self.images.set(index, url),
            DraftEdit::AppendImage => self.images.append(),
            DraftEdit::RemoveImage => self.images.remove_last(),
        }
    }

    /// Validates the buffer and coerces it into a request body.
    ///
    /// # Errors
    /// Returns the first field that cannot be coerced.
    pub fn to_payload(&self) -> Result<ProductPayload, ValidationError> {
        let origin_price = parse_price(DraftField::OriginPrice, &self.origin_price)?;
        let price = parse_price(DraftField::Price, &self.price)?;

        Ok(ProductPayload {
            id: self.id.clone(),
            image_url: self.image_url.clone(),
            title: self.title.clone(),
            category: self.category.clone(),
            unit: self.unit.clone(),
            origin_price,
            price,
            description: self.description.clone(),
            content: self.content.clone(),
            is_enabled: wire::enabled_to_wire(self.is_enabled),
            images_url: self.images.as_slice().to_vec(),
        })
    }
}

fn parse_price(field: DraftField, text: &str) -> Result<f64, ValidationError> {
    let text = text.trim();
    let fail = |reason| ValidationError { field, reason };

    if text.is_empty() {
        return Err(fail(ValidationReason::Empty));
    }
    let Ok(value) = text.parse::<f64>() else {
        return Err(fail(ValidationReason::NotANumber));
    };
    if !value.is_finite() {
        return Err(fail(ValidationReason::NotANumber));
    }
    if value < 0.0 {
        return Err(fail(ValidationReason::Negative));
    }
    Ok(value)
}

fn format_price(value: f64) -> String {
    format!("{value}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_draft_has_one_blank_slot() {
        let draft = ProductDraft::default();
        assert_eq!(draft.images.as_slice(), [String::new()]);
        assert_eq!(draft.id, None);
        assert!(!draft.is_enabled);
    }

    #[test]
    fn test_append_rejected_while_blank_slot_exists() {
        let mut draft = ProductDraft::default();
        assert_eq!(
            draft.apply(DraftEdit::AppendImage),
            Err(ImageSlotRejection::BlankSlot)
        );
        assert_eq!(draft.images.len(), 1);
    }

    #[test]
    fn test_append_rejected_when_earlier_slot_blank() {
        let (mut slots, _) = ImageSlots::from_urls(vec![String::new(), "b".to_string()]);
        assert_eq!(slots.append(), Err(ImageSlotRejection::BlankSlot));
        assert_eq!(slots.len(), 2);
    }

    #[test]
    fn test_slots_stay_within_bounds() {
        let mut draft = ProductDraft::default();
        for i in 0..MAX_IMAGE_SLOTS {
            draft
                .apply(DraftEdit::SetImage {
                    index: i,
                    url: format!("https://img/{i}.png"),
                })
                .unwrap();
            let _ = draft.apply(DraftEdit::AppendImage);
        }
        assert_eq!(draft.images.len(), MAX_IMAGE_SLOTS);
        assert_eq!(
            draft.apply(DraftEdit::AppendImage),
            Err(ImageSlotRejection::Full)
        );

        for _ in 0..10 {
            let _ = draft.apply(DraftEdit::RemoveImage);
        }
        assert_eq!(draft.images.len(), 1);
        assert_eq!(draft.images.get(0), Some("https://img/0.png"));
        assert_eq!(
            draft.apply(DraftEdit::RemoveImage),
            Err(ImageSlotRejection::LastSlot)
        );
    }

    #[test]
    fn test_remove_drops_last_slot() {
        let (mut slots, _) = ImageSlots::from_urls(vec!["a".into(), "b".into(), "c".into()]);
        slots.remove_last().unwrap();
        assert_eq!(slots.as_slice(), ["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_set_image_out_of_range_is_noop() {
        let mut draft = ProductDraft::default();
        let before = draft.clone();
        assert_eq!(
            draft.apply(DraftEdit::SetImage {
                index: 3,
                url: "x".to_string()
            }),
            Err(ImageSlotRejection::OutOfRange)
        );
        assert_eq!(draft, before);
    }

    #[test]
    fn test_from_product_pads_and_truncates_images() {
        let empty = Product {
            id: "p1".to_string(),
            ..Default::default()
        };
        assert_eq!(ProductDraft::from_product(&empty).images.len(), 1);

        let many = Product {
            id: "p2".to_string(),
            images_url: (0..7).map(|i| format!("u{i}")).collect(),
            ..Default::default()
        };
        let draft = ProductDraft::from_product(&many);
        assert_eq!(draft.images.len(), MAX_IMAGE_SLOTS);
        assert_eq!(draft.images.get(4), Some("u4"));
    }

    #[test]
    fn test_from_product_formats_prices() {
        let product = Product {
            id: "p1".to_string(),
            origin_price: 10.0,
            price: 19.5,
            is_enabled: true,
            ..Default::default()
        };
        let draft = ProductDraft::from_product(&product);
        assert_eq!(draft.origin_price, "10");
        assert_eq!(draft.price, "19.5");
        assert_eq!(draft.id.as_deref(), Some("p1"));
        assert!(draft.is_enabled);
    }

    #[test]
    fn test_to_payload_coerces_numbers_and_flag() {
        let mut draft = ProductDraft::default();
        draft
            .apply(DraftEdit::SetText(DraftField::Title, "T".to_string()))
            .unwrap();
        draft
            .apply(DraftEdit::SetText(DraftField::OriginPrice, "10".to_string()))
            .unwrap();
        draft
            .apply(DraftEdit::SetText(DraftField::Price, " 20 ".to_string()))
            .unwrap();
        draft.apply(DraftEdit::ToggleEnabled).unwrap();

        let payload = draft.to_payload().unwrap();
        assert_eq!(payload.title, "T");
        assert!((payload.origin_price - 10.0).abs() < f64::EPSILON);
        assert!((payload.price - 20.0).abs() < f64::EPSILON);
        assert_eq!(payload.is_enabled, 1);
        assert_eq!(payload.images_url, vec![String::new()]);
        assert_eq!(payload.id, None);
    }

    #[test]
    fn test_to_payload_rejects_bad_prices() {
        let mut draft = ProductDraft {
            origin_price: "abc".to_string(),
            price: "5".to_string(),
            ..Default::default()
        };
        assert_eq!(
            draft.to_payload(),
            Err(ValidationError {
                field: DraftField::OriginPrice,
                reason: ValidationReason::NotANumber
            })
        );

        draft.origin_price = "1".to_string();
        draft.price = "-3".to_string();
        assert_eq!(
            draft.to_payload().unwrap_err().reason,
            ValidationReason::Negative
        );

        draft.price = "inf".to_string();
        assert_eq!(
            draft.to_payload().unwrap_err().reason,
            ValidationReason::NotANumber
        );

        draft.price = String::new();
        let err = draft.to_payload().unwrap_err();
        assert_eq!(err.reason, ValidationReason::Empty);
        assert_eq!(err.to_string(), "Price is required");
    }
}
