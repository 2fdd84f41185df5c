//! Fixed default table. Absent style input always resolves to these.

pub const GRAPH_ID: &str = "G";

pub const LABEL_HEIGHT: f64 = 18.1328125;
pub const LABEL_WIDTH: f64 = 55.708984375;
pub const FONT_FAMILY: &str = "Dialog";
pub const FONT_SIZE: u32 = 12;
pub const ICON_TEXT_GAP: u32 = 4;

pub const BORDER_WIDTH: f64 = 1.0;
pub const LINE_WIDTH: f64 = 1.0;

pub const NODE_LABEL_POSITION: &str = "c";
pub const GROUP_LABEL_POSITION: &str = "t";
pub const EDGE_LABEL_POSITION: &str = "center";

pub const SOURCE_LABEL_POSITION: &str = "stail";
pub const TARGET_LABEL_POSITION: &str = "thead";
pub const SOURCE_LABEL_PLACEMENT: &str = "source_on_edge";
pub const TARGET_LABEL_PLACEMENT: &str = "target_on_edge";
