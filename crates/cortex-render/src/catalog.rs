//! Static SVG data for every die glyph.

use cortex_core::DieFace;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClipPath {
    pub id: &'static str,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextAnchor {
    pub x: f64,
    pub y: f64,
    /// Overrides the default 15px.
    pub font_size: Option<&'static str>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DieGlyph {
    pub face: DieFace,
    pub view_box: &'static str,
    /// Drawn in order; the first path is the outer shape.
    pub paths: &'static [&'static str],
    pub clip_path: Option<ClipPath>,
    pub text: TextAnchor,
    /// The value is not printed on the glyph.
    pub no_text: bool,
}

pub static CATALOG: [DieGlyph; 6] = [
    DieGlyph {
        face: DieFace::D4,
        view_box: "0 0 30 26",
        paths: &["M14.6814 25.5209L29.5 0H0L14.6814 25.5209Z"],
        clip_path: Some(ClipPath {
            id: "d4-clip0",
            width: 29.5,
            height: 25.5209,
        }),
        text: TextAnchor {
            x: 14.0,
            y: 15.0,
            font_size: None,
        },
        no_text: false,
    },
    DieGlyph {
        face: DieFace::D6,
        view_box: "0 0 23 23",
        paths: &["M21 2H2V21H21Z"],
        clip_path: None,
        text: TextAnchor {
            x: 11.0,
            y: 16.0,
            font_size: Some("12px"),
        },
        no_text: false,
    },
    DieGlyph {
        face: DieFace::D8,
        view_box: "0 0 56 57",
        paths: &[
            "M27.8735 2.00001L1.52148 28.3521L27.8735 54.7041L54.2256 28.3521L27.8735 2.00001Z",
        ],
        clip_path: None,
        text: TextAnchor {
            x: 27.0,
            y: 38.0,
            font_size: Some("28px"),
        },
        no_text: false,
    },
    DieGlyph {
        face: DieFace::D10,
        view_box: "0 0 26 28",
        paths: &["M13 0L0 9.41935V18.5806L13 28L26 18.5806V9.41935L13 0Z"],
        clip_path: None,
        text: TextAnchor {
            x: 12.3,
            y: 20.0,
            font_size: None,
        },
        no_text: false,
    },
    DieGlyph {
        face: DieFace::D12,
        view_box: "0 0 26 27",
        paths: &[
            "M4.94 2.57143L0 9.38571V17.7429L4.94 24.4286L13 27L21.06 24.4286L26 17.7429V9.38571L21.06 2.57143L13 0L4.94 2.57143Z",
        ],
        clip_path: None,
        text: TextAnchor {
            x: 12.4,
            y: 19.0,
            font_size: None,
        },
        no_text: false,
    },
    DieGlyph {
        face: DieFace::PlotPoint,
        view_box: "0 0 26 26",
        paths: &[
            "M13.0282 26.0564C20.2235 26.0564 26.0564 20.2235 26.0564 13.0282C26.0564 5.83292 20.2235 0 13.0282 0C5.83292 0 0 5.83292 0 13.0282C0 20.2235 5.83292 26.0564 13.0282 26.0564Z",
            "M5.86548 8.1775C5.86548 8.00831 5.97828 7.89551 6.14747 7.89551H9.58782C11.3926 7.89551 12.859 9.36189 12.859 11.1103C12.859 12.915 11.3926 14.3814 9.58782 14.3814H7.78305V17.8218C7.78305 17.991 7.67025 18.1038 7.50105 18.1038H6.14747C5.97828 18.1038 5.86548 17.991 5.86548 17.8218V8.1775ZM9.47502 12.633C10.321 12.633 10.9978 11.9562 10.9978 11.1103C10.9978 10.3207 10.321 9.70028 9.47502 9.70028H7.78305V12.633H9.47502Z",
            "M14.551 8.1775C14.551 8.00831 14.6638 7.89551 14.833 7.89551H18.2734C20.0781 7.89551 21.5445 9.36189 21.5445 11.1103C21.5445 12.915 20.0781 14.3814 18.2734 14.3814H16.4686V17.8218C16.4686 17.991 16.3558 18.1038 16.1866 18.1038H14.833C14.6638 18.1038 14.551 17.991 14.551 17.8218V8.1775ZM18.1606 12.633C19.0066 12.633 19.6833 11.9562 19.6833 11.1103C19.6833 10.3207 19.0066 9.70028 18.1606 9.70028H16.4686V12.633H18.1606Z",
        ],
        clip_path: Some(ClipPath {
            id: "plot-point-clip0",
            width: 26.0,
            height: 26.0,
        }),
        text: TextAnchor {
            x: 12.9,
            y: 18.3,
            font_size: None,
        },
        no_text: true,
    },
];

/// Catalog entry for `face`. The unrated sentinel has no glyph.
pub fn lookup(face: DieFace) -> Option<&'static DieGlyph> {
    CATALOG.iter().find(|glyph| glyph.face == face)
}
