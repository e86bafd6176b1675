//! Export session: the registries of one workbook export and its part renderers.
//!
//! An [`ExportSession`] owns every piece of cross-part state of an export:
//! shared strings, sheet names, styles and images. Worksheets are rendered as
//! they are added; package-level parts are rendered afterwards from the
//! accumulated registries.
//!
//! # Examples
//!
//! ```rust
//! use xlsx_factory::{ExcelCell, ExcelRow, ExcelTable, ExcelWorksheet, ExportSession};
//!
//! let mut session = ExportSession::new();
//! session.start_export();
//!
//! let worksheet = ExcelWorksheet {
//!     name: "Report".to_string(),
//!     table: ExcelTable {
//!         rows: vec![ExcelRow {
//!             cells: vec![ExcelCell::string("Hello")],
//!             ..Default::default()
//!         }],
//!         ..Default::default()
//!     },
//! };
//! let sheet = session.create_excel(&[], &worksheet, None, None, None)?;
//! assert_eq!(sheet.name, "Report");
//!
//! let parts = session.package_parts(vec![sheet.xml])?;
//! assert!(parts.iter().any(|p| p.path == "xl/sharedStrings.xml"));
//! # Ok::<(), xlsx_factory::ExportError>(())
//! ```

use std::fmt;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::Utc;

use crate::common::xml::create_xml_part;
use crate::ooxml::error::{ExportError, Result};
use crate::ooxml::opc::constants::{content_type as ct, relationship_type as rt};
use crate::ooxml::opc::{ContentTypes, Relationships};
use crate::ooxml::xlsx::format::ExcelStyle;
use crate::ooxml::xlsx::image::{ExcelImage, PlacedImage};
use crate::ooxml::xlsx::worksheet::{ExcelWorksheet, HeaderFooterConfig, PageSetup, SheetMargin};

use super::properties::CoreProperties;
use super::drawing::{drawing_element, drawing_relationships};
use super::images::ImageRegistry;
use super::options::{ExportOptions, FactoryMode};
use super::package::PackagePart;
use super::sheet::WorksheetPart;
use super::sheet_names::SheetNameRegistry;
use super::strings::SharedStringTable;
use super::styles::StyleRegistry;
use super::theme::OfficeTheme;
use super::workbook::workbook_element;

/// Lifecycle state of an [`ExportSession`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SessionState {
    /// Nothing registered since creation or the last reset
    #[default]
    Empty,
    /// Sheets, strings and images are being registered
    Building,
    /// Package-level parts have been requested; registries are frozen
    Finalizing,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Empty => "empty",
            Self::Building => "building",
            Self::Finalizing => "finalizing",
        })
    }
}

/// A worksheet rendered by [`ExportSession::create_excel`].
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedSheet {
    /// Name the sheet was registered under, suffixed if the requested name was taken
    pub name: String,
    /// Content of `xl/worksheets/sheet<N>.xml`
    pub xml: String,
}

/// State of one workbook export.
#[derive(Debug, Clone)]
pub struct ExportSession {
    options: ExportOptions,
    mode: FactoryMode,
    state: SessionState,
    strings: SharedStringTable,
    sheet_names: SheetNameRegistry,
    images: ImageRegistry,
    styles: StyleRegistry,
}

impl ExportSession {
    /// Create an empty session with default options.
    pub fn new() -> Self {
        Self::with_options(ExportOptions::default())
    }

    /// Create an empty session.
    pub fn with_options(options: ExportOptions) -> Self {
        Self {
            mode: options.factory_mode,
            options,
            state: SessionState::Empty,
            strings: SharedStringTable::new(),
            sheet_names: SheetNameRegistry::new(),
            images: ImageRegistry::new(),
            styles: StyleRegistry::new(),
        }
    }

    // ===== Session lifecycle =====

    /// Clear every registry and return to [`SessionState::Empty`].
    ///
    /// The factory mode falls back to [`FactoryMode::SingleSheet`].
    pub fn reset(&mut self) {
        self.strings.clear();
        self.images.clear();
        self.sheet_names.clear();
        self.styles.clear();
        self.mode = FactoryMode::default();
        self.state = SessionState::Empty;
        log::debug!("export session reset");
    }

    /// Prepare for a new export.
    ///
    /// Resets the session in [`FactoryMode::SingleSheet`] mode; in
    /// [`FactoryMode::MultiSheet`] mode previously added sheets are kept so
    /// they end up in the same workbook.
    pub fn start_export(&mut self) {
        match self.mode {
            FactoryMode::SingleSheet => self.reset(),
            FactoryMode::MultiSheet => {
                log::debug!(
                    "multi-sheet export continues with {} sheets",
                    self.sheet_names.len()
                );
            },
        }
    }

    #[inline]
    pub fn state(&self) -> SessionState {
        self.state
    }

    #[inline]
    pub fn factory_mode(&self) -> FactoryMode {
        self.mode
    }

    #[inline]
    pub fn set_factory_mode(&mut self, mode: FactoryMode) {
        self.mode = mode;
    }

    #[inline]
    pub fn options(&self) -> &ExportOptions {
        &self.options
    }

    /// Names of the sheets added so far, in workbook order.
    #[inline]
    pub fn sheet_names(&self) -> &[String] {
        self.sheet_names.names()
    }

    #[inline]
    pub fn shared_strings(&self) -> &SharedStringTable {
        &self.strings
    }

    #[inline]
    pub fn images(&self) -> &ImageRegistry {
        &self.images
    }

    #[inline]
    pub fn styles(&self) -> &StyleRegistry {
        &self.styles
    }

    fn enter_building(&mut self, operation: &'static str) -> Result<()> {
        if self.state == SessionState::Finalizing {
            return Err(ExportError::InvalidCallOrder {
                operation,
                state: self.state,
            });
        }
        self.state = SessionState::Building;
        Ok(())
    }

    fn ensure_started(&self, operation: &'static str) -> Result<()> {
        if self.state == SessionState::Empty {
            return Err(ExportError::InvalidCallOrder {
                operation,
                state: self.state,
            });
        }
        Ok(())
    }

    /// Run a package-level renderer; the session enters `Finalizing` only when it succeeds.
    fn finalize<T>(
        &mut self,
        operation: &'static str,
        render: impl FnOnce(&Self) -> Result<T>,
    ) -> Result<T> {
        self.ensure_started(operation)?;
        let rendered = render(self)?;
        self.state = SessionState::Finalizing;
        Ok(rendered)
    }

    // ===== Registration =====

    /// Register a sheet name and return the name it resolved to.
    pub fn add_sheet_name(&mut self, requested: &str) -> Result<String> {
        self.enter_building("add_sheet_name")?;
        Ok(self.sheet_names.add(requested))
    }

    /// Position of `value` in the shared string table, interning it if new.
    pub fn get_string_position(&mut self, value: &str) -> Result<usize> {
        self.enter_building("get_string_position")?;
        Ok(self.strings.position(value))
    }

    /// Register an image on the sheet currently being built.
    ///
    /// The current sheet is the one the next [`Self::create_excel`] call adds,
    /// so images must be registered before their sheet is rendered. An image
    /// without row and column is anchored at `row_index` and at the 1-based
    /// position of `column` in `columns_to_export`; a column that is not
    /// exported anchors at column 0.
    pub fn build_image_map<C: PartialEq>(
        &mut self,
        image: &ExcelImage,
        row_index: u32,
        column: &C,
        columns_to_export: &[C],
    ) -> Result<PlacedImage> {
        self.enter_building("build_image_map")?;

        let column_index = match columns_to_export.iter().position(|c| c == column) {
            Some(position) => position as u32 + 1,
            None => {
                if image.lacks_placement() {
                    log::warn!("image '{}' anchored to a column that is not exported", image.id);
                }
                0
            },
        };

        let sheet_index = self.sheet_names.len();
        let placed = PlacedImage::resolve(image, row_index, column_index);
        self.images.register(sheet_index, image, placed.clone());
        Ok(placed)
    }

    // ===== Part rendering =====

    /// Register `styles`, add the worksheet's name and render the worksheet.
    ///
    /// Returns the resolved sheet name with the content of
    /// `xl/worksheets/sheet<N>.xml`; `worksheet` itself is left untouched.
    pub fn create_excel(
        &mut self,
        styles: &[ExcelStyle],
        worksheet: &ExcelWorksheet,
        margins: Option<&SheetMargin>,
        page_setup: Option<&PageSetup>,
        header_footer: Option<&HeaderFooterConfig>,
    ) -> Result<RenderedSheet> {
        self.enter_building("create_excel")?;

        let sheet_index = self.sheet_names.len();
        let has_drawing = self.images.sheet_images(sheet_index).is_some();
        let name = self.sheet_names.add(&worksheet.name);
        self.styles.register_styles(styles);

        let part = WorksheetPart {
            worksheet,
            sheet_index,
            margins,
            page_setup,
            header_footer,
            has_drawing,
        };
        let xml = create_xml_part(&part.to_element(&mut self.strings, &self.styles))?;

        log::debug!(
            "rendered sheet #{} '{}' ({} rows, drawing: {})",
            sheet_index + 1,
            name,
            worksheet.table.rows.len(),
            has_drawing
        );
        Ok(RenderedSheet { name, xml })
    }

    /// Render `xl/workbook.xml`.
    pub fn create_workbook(&mut self) -> Result<String> {
        self.finalize("create_workbook", |session| {
            create_xml_part(&workbook_element(session.sheet_names.names()))
        })
    }

    /// Render `xl/styles.xml`.
    pub fn create_stylesheet(&mut self, default_font_size: f64) -> Result<String> {
        self.finalize("create_stylesheet", |session| {
            create_xml_part(&session.styles.to_element(default_font_size))
        })
    }

    /// Render `xl/sharedStrings.xml`.
    pub fn create_shared_strings(&mut self) -> Result<String> {
        self.finalize("create_shared_strings", |session| {
            create_xml_part(&session.strings.to_element())
        })
    }

    /// Render `docProps/core.xml`.
    pub fn create_core(&mut self, author: &str) -> Result<String> {
        self.finalize("create_core", |session| {
            let timestamp = session.options.created.unwrap_or_else(Utc::now);
            create_xml_part(&CoreProperties::new(author, timestamp).to_element())
        })
    }

    /// Render `[Content_Types].xml` for a workbook of `sheet_len` sheets.
    pub fn create_content_types(&mut self, sheet_len: usize) -> Result<String> {
        self.finalize("create_content_types", |session| {
            let mut types = ContentTypes::new();
            for (_, image) in session.images.workbook_images() {
                types.add_default(image.image_type.extension(), image.image_type.content_type());
            }

            types.add_override("/xl/workbook.xml", ct::SML_SHEET_MAIN);
            for sheet in 1..=sheet_len {
                types.add_override(format!("/xl/worksheets/sheet{sheet}.xml"), ct::SML_WORKSHEET);
            }
            types.add_override("/xl/theme/theme1.xml", ct::OFC_THEME);
            types.add_override("/xl/styles.xml", ct::SML_STYLES);
            types.add_override("/xl/sharedStrings.xml", ct::SML_SHARED_STRINGS);

            let drawings = session
                .images
                .sheets_with_images()
                .filter(|&sheet| sheet < sheet_len)
                .count();
            for drawing in 1..=drawings {
                types.add_override(format!("/xl/drawings/drawing{drawing}.xml"), ct::OFC_DRAWING);
            }
            types.add_override("/docProps/core.xml", ct::OPC_CORE_PROPERTIES);

            create_xml_part(&types.to_element())
        })
    }

    /// Render the package relationships (`_rels/.rels`).
    pub fn create_rels(&mut self) -> Result<String> {
        self.finalize("create_rels", |_| {
            let mut rels = Relationships::new();
            rels.add(rt::OFFICE_DOCUMENT, "xl/workbook.xml");
            rels.add(rt::CORE_PROPERTIES, "docProps/core.xml");
            create_xml_part(&rels.to_element())
        })
    }

    /// Render `xl/theme/theme1.xml`.
    pub fn create_theme(&mut self) -> Result<String> {
        self.finalize("create_theme", |_| {
            create_xml_part(&OfficeTheme::office().to_element())
        })
    }

    /// Render `xl/_rels/workbook.xml.rels` for a workbook of `sheet_len` sheets.
    ///
    /// Worksheets take `rId1..rId<sheet_len>`, followed by the theme, the
    /// stylesheet and the shared strings.
    pub fn create_workbook_rels(&mut self, sheet_len: usize) -> Result<String> {
        self.finalize("create_workbook_rels", |_| {
            let mut rels = Relationships::new();
            for sheet in 1..=sheet_len {
                rels.add(rt::WORKSHEET, format!("worksheets/sheet{sheet}.xml"));
            }
            rels.add(rt::THEME, "theme/theme1.xml");
            rels.add(rt::STYLES, "styles.xml");
            rels.add(rt::SHARED_STRINGS, "sharedStrings.xml");
            create_xml_part(&rels.to_element())
        })
    }

    /// Render the drawing part of the sheet at `sheet_index`.
    pub fn create_drawing(&mut self, sheet_index: usize) -> Result<String> {
        self.finalize("create_drawing", |session| {
            create_xml_part(&drawing_element(&session.images, sheet_index)?)
        })
    }

    /// Render the relationships of the drawing of the sheet at `sheet_index`.
    pub fn create_drawing_rel(&mut self, sheet_index: usize) -> Result<String> {
        self.finalize("create_drawing_rel", |session| {
            create_xml_part(&drawing_relationships(&session.images, sheet_index)?.to_element())
        })
    }

    /// Render the worksheet relationships pointing at drawing `drawing_index` (zero-based).
    pub fn create_worksheet_drawing_rel(&mut self, drawing_index: usize) -> Result<String> {
        self.finalize("create_worksheet_drawing_rel", |_| {
            let mut rels = Relationships::new();
            rels.add(
                rt::DRAWING,
                format!("../drawings/drawing{}.xml", drawing_index + 1),
            );
            create_xml_part(&rels.to_element())
        })
    }

    // ===== Package assembly =====

    /// Render every package part, using the session options for the
    /// document author and default font size.
    ///
    /// `worksheets` are the XML strings returned by [`Self::create_excel`], in
    /// the order the sheets were added. Media files are decoded from the
    /// registered base64 payloads.
    pub fn package_parts(&mut self, worksheets: Vec<String>) -> Result<Vec<PackagePart>> {
        self.ensure_started("package_parts")?;

        let sheet_len = self.sheet_names.len();
        if worksheets.len() != sheet_len {
            return Err(ExportError::SheetCountMismatch {
                expected: sheet_len,
                actual: worksheets.len(),
            });
        }

        let state = self.state;
        let parts = self.assemble_parts(worksheets);
        if parts.is_err() {
            self.state = state;
        }
        parts
    }

    fn assemble_parts(&mut self, worksheets: Vec<String>) -> Result<Vec<PackagePart>> {
        let sheet_len = worksheets.len();
        let author = self.options.author.clone();
        let font_size = self.options.default_font_size;

        let mut parts = vec![
            PackagePart::xml("[Content_Types].xml", self.create_content_types(sheet_len)?),
            PackagePart::xml("_rels/.rels", self.create_rels()?),
            PackagePart::xml("docProps/core.xml", self.create_core(&author)?),
            PackagePart::xml("xl/workbook.xml", self.create_workbook()?),
            PackagePart::xml("xl/_rels/workbook.xml.rels", self.create_workbook_rels(sheet_len)?),
            PackagePart::xml("xl/styles.xml", self.create_stylesheet(font_size)?),
            PackagePart::xml("xl/sharedStrings.xml", self.create_shared_strings()?),
            PackagePart::xml("xl/theme/theme1.xml", self.create_theme()?),
        ];

        for (index, xml) in worksheets.into_iter().enumerate() {
            let sheet = index + 1;
            parts.push(PackagePart::xml(format!("xl/worksheets/sheet{sheet}.xml"), xml));

            let Some(drawing_index) = self.images.drawing_index(index) else {
                continue;
            };
            let drawing = drawing_index + 1;
            parts.push(PackagePart::xml(
                format!("xl/worksheets/_rels/sheet{sheet}.xml.rels"),
                self.create_worksheet_drawing_rel(drawing_index)?,
            ));
            parts.push(PackagePart::xml(
                format!("xl/drawings/drawing{drawing}.xml"),
                self.create_drawing(index)?,
            ));
            parts.push(PackagePart::xml(
                format!("xl/drawings/_rels/drawing{drawing}.xml.rels"),
                self.create_drawing_rel(index)?,
            ));
        }

        for (id, image) in self.images.workbook_images() {
            parts.push(PackagePart::binary(
                format!("xl/media/{}", image.file_name()),
                decode_image(id, &image.base64)?,
            ));
        }

        log::debug!("packaged {} parts for {} sheets", parts.len(), sheet_len);
        Ok(parts)
    }
}

impl Default for ExportSession {
    fn default() -> Self {
        Self::new()
    }
}

/// Decode a base64 payload, accepting `data:<mime>;base64,` URLs.
fn decode_image(id: &str, payload: &str) -> Result<Vec<u8>> {
    let invalid = |reason: String| ExportError::InvalidImageData {
        id: id.to_string(),
        reason,
    };

    let data = match payload.trim_start().strip_prefix("data:") {
        Some(url) => {
            url.split_once(',')
                .map(|(_, data)| data)
                .ok_or_else(|| invalid("data URL without payload".to_string()))?
        },
        None => payload,
    };

    let cleaned: String = data.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    STANDARD
        .decode(cleaned)
        .map_err(|e| invalid(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::xlsx::image::{ImagePosition, ImageType};
    use super::super::package::PartContent;
    use crate::ooxml::xlsx::worksheet::{ExcelCell, ExcelRow, ExcelTable};
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use quick_xml::Reader;
    use quick_xml::events::Event;

    const COLUMNS: [&str; 3] = ["make", "model", "price"];

    /// 1x1 transparent PNG
    const PIXEL: &str = "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAQAAAC1HAwCAAAAC0lEQVR42mNkYAAAAAYAAjCB0C8AAAAASUVORK5CYII=";

    fn sheet(name: &str, texts: &[&str]) -> ExcelWorksheet {
        ExcelWorksheet {
            name: name.to_string(),
            table: ExcelTable {
                columns: Vec::new(),
                rows: vec![ExcelRow {
                    cells: texts.iter().map(|t| ExcelCell::string(*t)).collect(),
                    ..Default::default()
                }],
            },
        }
    }

    fn logo(id: &str) -> ExcelImage {
        ExcelImage {
            id: id.to_string(),
            base64: PIXEL.to_string(),
            image_type: ImageType::Png,
            ..Default::default()
        }
    }

    fn assert_well_formed(xml: &str) {
        let mut reader = Reader::from_str(xml);
        loop {
            match reader.read_event() {
                Ok(Event::Eof) => break,
                Ok(_) => {},
                Err(e) => panic!("malformed XML: {e}\n{xml}"),
            }
        }
    }

    fn pinned_session() -> ExportSession {
        let created = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        ExportSession::with_options(ExportOptions::new().with_created(created))
    }

    #[test]
    fn test_end_to_end_registries() {
        let mut session = pinned_session();
        session.start_export();

        assert_eq!(session.add_sheet_name("Sheet1").unwrap(), "Sheet1");
        assert_eq!(session.add_sheet_name("Sheet1").unwrap(), "Sheet1_1");
        session.reset();

        assert_eq!(session.get_string_position("A").unwrap(), 0);
        assert_eq!(session.get_string_position("B").unwrap(), 1);
        assert_eq!(session.get_string_position("A").unwrap(), 0);
        assert_eq!(session.shared_strings().len(), 2);

        let image = logo("img1");
        let placed = session
            .build_image_map(&image, 3, &"model", &COLUMNS)
            .unwrap();
        assert_eq!((placed.row, placed.column), (3, 2));
        assert_eq!(image.position, None);

        session.add_sheet_name("First").unwrap();
        session.build_image_map(&image, 7, &"make", &COLUMNS).unwrap();
        session.add_sheet_name("Second").unwrap();

        let sheets = session.images().image_sheets("img1").unwrap();
        assert_eq!(sheets.len(), 2);
        assert_eq!((sheets[0].sheet_index, sheets[1].sheet_index), (0, 1));
        assert_eq!(session.images().workbook_image("img1").unwrap().index, 0);

        let rels = session.create_drawing_rel(0).unwrap();
        assert_eq!(rels.matches("<Relationship ").count(), 1);
        assert!(rels.contains(r#"Target="../media/image1.png""#));
    }

    #[test]
    fn test_repeated_placement_is_deduplicated() {
        let mut session = ExportSession::new();
        let image = logo("img1");

        session.build_image_map(&image, 2, &"price", &COLUMNS).unwrap();
        session.build_image_map(&image.clone(), 2, &"price", &COLUMNS).unwrap();
        session.build_image_map(&image, 5, &"price", &COLUMNS).unwrap();

        assert_eq!(session.images().sheet_images(0).unwrap().len(), 2);
        assert_eq!(session.images().image_sheets("img1").unwrap()[0].placements.len(), 3);
    }

    #[test]
    fn test_image_placement_rules() {
        let mut session = ExportSession::new();

        let missing = session
            .build_image_map(&logo("a"), 4, &"color", &COLUMNS)
            .unwrap();
        assert_eq!((missing.row, missing.column), (4, 0));

        let mut fixed = logo("b");
        fixed.position = Some(ImagePosition {
            row: Some(10),
            ..Default::default()
        });
        let partial = session.build_image_map(&fixed, 4, &"model", &COLUMNS).unwrap();
        assert_eq!((partial.row, partial.column), (10, 0));
    }

    #[test]
    fn test_call_order() {
        let mut session = ExportSession::new();
        assert_eq!(session.state(), SessionState::Empty);

        let err = session.create_workbook().unwrap_err();
        assert!(matches!(
            err,
            ExportError::InvalidCallOrder {
                operation: "create_workbook",
                state: SessionState::Empty
            }
        ));
        assert_eq!(
            err.to_string(),
            "Invalid call order: create_workbook is not allowed while the session is empty"
        );

        session.create_excel(&[], &sheet("Data", &["x"]), None, None, None).unwrap();
        assert_eq!(session.state(), SessionState::Building);

        session.create_shared_strings().unwrap();
        assert_eq!(session.state(), SessionState::Finalizing);

        assert!(matches!(
            session.create_excel(&[], &sheet("More", &[]), None, None, None),
            Err(ExportError::InvalidCallOrder {
                operation: "create_excel",
                state: SessionState::Finalizing
            })
        ));
        assert!(session.get_string_position("late").is_err());
        assert!(session.build_image_map(&logo("late"), 1, &"make", &COLUMNS).is_err());

        // Finalizing renderers may be called repeatedly
        session.create_workbook().unwrap();

        session.reset();
        assert_eq!(session.state(), SessionState::Empty);
        session.add_sheet_name("Data").unwrap();
        assert_eq!(session.state(), SessionState::Building);
    }

    #[test]
    fn test_drawing_without_images() {
        let mut session = ExportSession::new();
        session.add_sheet_name("Plain").unwrap();

        assert!(matches!(session.create_drawing(0), Err(ExportError::NoSheetImages(0))));
        assert!(matches!(session.create_drawing_rel(0), Err(ExportError::NoSheetImages(0))));

        // A rejected renderer leaves the session open for more sheets
        assert_eq!(session.state(), SessionState::Building);
        assert_eq!(session.add_sheet_name("Next").unwrap(), "Next");
    }

    #[test]
    fn test_reset_behaves_like_fresh_session() {
        let mut session = ExportSession::new();
        session.set_factory_mode(FactoryMode::MultiSheet);
        session.create_excel(&[], &sheet("Data", &["a", "b"]), None, None, None).unwrap();
        session.build_image_map(&logo("img"), 1, &"make", &COLUMNS).unwrap();

        session.reset();

        assert_eq!(session.factory_mode(), FactoryMode::SingleSheet);
        assert!(session.sheet_names().is_empty());
        assert!(session.shared_strings().is_empty());
        assert!(session.images().is_empty());
        assert_eq!(session.get_string_position("b").unwrap(), 0);
        assert_eq!(session.add_sheet_name("Data").unwrap(), "Data");
    }

    #[test]
    fn test_start_export_modes() {
        let mut session = ExportSession::new();
        session.add_sheet_name("One").unwrap();
        session.start_export();
        assert!(session.sheet_names().is_empty());

        let mut session =
            ExportSession::with_options(ExportOptions::new().with_factory_mode(FactoryMode::MultiSheet));
        session.add_sheet_name("One").unwrap();
        session.start_export();
        session.add_sheet_name("One").unwrap();
        assert_eq!(session.sheet_names(), ["One", "One_1"]);
    }

    #[test]
    fn test_create_excel_resolves_name_without_mutating_input() {
        let mut session = ExportSession::new();
        let worksheet = sheet("Data", &["x"]);

        let first = session.create_excel(&[], &worksheet, None, None, None).unwrap();
        let second = session.create_excel(&[], &worksheet, None, None, None).unwrap();

        assert_eq!(first.name, "Data");
        assert_eq!(second.name, "Data_1");
        assert_eq!(worksheet.name, "Data");
        assert!(first.xml.contains("tabSelected=\"1\""));
        assert!(!second.xml.contains("tabSelected"));
    }

    #[test]
    fn test_package_level_parts() {
        let mut session = pinned_session();
        session.add_sheet_name("A").unwrap();
        session.add_sheet_name("B").unwrap();

        let rels = session.create_rels().unwrap();
        assert!(rels.contains(r#"<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/>"#));
        assert!(rels.contains(r#"<Relationship Id="rId2" Type="http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties" Target="docProps/core.xml"/>"#));

        let workbook_rels = session.create_workbook_rels(2).unwrap();
        for (id, target) in [
            ("rId1", "worksheets/sheet1.xml"),
            ("rId2", "worksheets/sheet2.xml"),
            ("rId3", "theme/theme1.xml"),
            ("rId4", "styles.xml"),
            ("rId5", "sharedStrings.xml"),
        ] {
            assert!(
                workbook_rels.contains(&format!(r#"Id="{id}""#)) && workbook_rels.contains(target),
                "{id} -> {target}"
            );
        }
        assert!(workbook_rels.find("rId3").unwrap() < workbook_rels.find("theme/theme1.xml").unwrap());

        let drawing_rel = session.create_worksheet_drawing_rel(2).unwrap();
        assert!(drawing_rel.contains(r#"Id="rId1""#));
        assert!(drawing_rel.contains(r#"Target="../drawings/drawing3.xml""#));

        let core = session.create_core("Analyst").unwrap();
        assert!(core.contains("<dc:creator>Analyst</dc:creator>"));
        assert!(core.contains("2024-01-02T03:04:05Z"));

        for xml in [
            rels,
            workbook_rels,
            drawing_rel,
            core,
            session.create_theme().unwrap(),
            session.create_stylesheet(11.0).unwrap(),
            session.create_workbook().unwrap(),
        ] {
            assert!(xml.starts_with(crate::common::xml::XML_HEADER));
            assert_well_formed(&xml);
        }
    }

    #[test]
    fn test_content_types() {
        let mut session = ExportSession::new();
        let mut jpg = logo("photo");
        jpg.image_type = ImageType::Jpg;
        session.build_image_map(&jpg, 1, &"make", &COLUMNS).unwrap();
        session.add_sheet_name("Photos").unwrap();
        session.add_sheet_name("Empty").unwrap();

        let xml = session.create_content_types(2).unwrap();
        assert!(xml.contains(r#"<Default Extension="jpg" ContentType="image/jpeg"/>"#));
        assert!(xml.contains(r#"<Override PartName="/xl/worksheets/sheet2.xml""#));
        assert!(xml.contains(r#"<Override PartName="/xl/drawings/drawing1.xml""#));
        assert!(!xml.contains("drawing2.xml"));
        assert!(xml.contains(r#"<Override PartName="/docProps/core.xml""#));
        assert_well_formed(&xml);
    }

    #[test]
    fn test_package_parts() {
        let mut session = pinned_session();
        session.start_export();

        let first = session
            .create_excel(&[], &sheet("Plain", &["A", "B"]), None, None, None)
            .unwrap();

        let image = logo("img1");
        session.build_image_map(&image, 2, &"model", &COLUMNS).unwrap();
        let mut gif = logo("img2");
        gif.image_type = ImageType::Gif;
        gif.base64 = format!("data:image/gif;base64,{PIXEL}");
        session.build_image_map(&gif, 4, &"make", &COLUMNS).unwrap();
        let second = session
            .create_excel(&[], &sheet("Plain", &["A"]), None, None, None)
            .unwrap();
        assert_eq!(second.name, "Plain_1");
        assert!(second.xml.contains(r#"<drawing r:id="rId1"/>"#));

        let parts = session.package_parts(vec![first.xml, second.xml]).unwrap();
        let paths: Vec<&str> = parts.iter().map(|p| p.path.as_str()).collect();
        assert_eq!(
            paths,
            [
                "[Content_Types].xml",
                "_rels/.rels",
                "docProps/core.xml",
                "xl/workbook.xml",
                "xl/_rels/workbook.xml.rels",
                "xl/styles.xml",
                "xl/sharedStrings.xml",
                "xl/theme/theme1.xml",
                "xl/worksheets/sheet1.xml",
                "xl/worksheets/sheet2.xml",
                "xl/worksheets/_rels/sheet2.xml.rels",
                "xl/drawings/drawing1.xml",
                "xl/drawings/_rels/drawing1.xml.rels",
                "xl/media/image1.png",
                "xl/media/image2.gif",
            ]
        );

        for part in &parts {
            match part.content {
                PartContent::Xml(ref xml) => assert_well_formed(xml),
                PartContent::Binary(ref bytes) => assert!(bytes.starts_with(b"\x89PNG")),
            }
        }

        let strings = parts[6].as_xml().unwrap();
        assert!(strings.contains(r#"count="2" uniqueCount="2""#));
    }

    #[test]
    fn test_package_parts_validation() {
        let mut session = ExportSession::new();
        assert!(matches!(
            session.package_parts(Vec::new()),
            Err(ExportError::InvalidCallOrder { .. })
        ));

        let rendered = session.create_excel(&[], &sheet("S", &[]), None, None, None).unwrap();
        assert!(matches!(
            session.package_parts(Vec::new()),
            Err(ExportError::SheetCountMismatch {
                expected: 1,
                actual: 0
            })
        ));
        assert_eq!(session.state(), SessionState::Building);

        let mut broken = ExportSession::new();
        let mut image = logo("broken");
        image.base64 = "not base64!".to_string();
        broken.build_image_map(&image, 1, &"make", &COLUMNS).unwrap();
        let rendered_broken = broken.create_excel(&[], &sheet("S", &[]), None, None, None).unwrap();
        assert!(matches!(
            broken.package_parts(vec![rendered_broken.xml]),
            Err(ExportError::InvalidImageData { ref id, .. }) if id == "broken"
        ));
        assert_eq!(broken.state(), SessionState::Building);

        assert!(session.package_parts(vec![rendered.xml]).is_ok());
    }

    #[test]
    fn test_session_is_send() {
        fn assert_send<T: Send>() {}
        assert_send::<ExportSession>();
    }
}
