use std::fmt;

/// Non-fatal findings that are logged and carried on a step outcome but never
/// stop the step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StructuralWarning {
    /// The source image is larger than the target canvas.
    OversizedImage {
        width: u32,
        height: u32,
        canvas_width: u32,
        canvas_height: u32,
        cropped: bool,
    },
    /// The encoded width does not fit the firmware's per-row render buffer.
    RowBufferExceeded { width: u32, limit: u32 },
    /// More records than the firmware keeps in memory.
    RecordCapacityExceeded { count: usize, limit: usize },
}

impl fmt::Display for StructuralWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StructuralWarning::OversizedImage {
                width,
                height,
                canvas_width,
                canvas_height,
                cropped,
            } => {
                write!(
                    f,
                    "image is larger than the screen ({}x{} > {}x{})",
                    width, height, canvas_width, canvas_height
                )?;
                if *cropped {
                    write!(f, ", cropped to the centered {}x{} region", canvas_width, canvas_height)
                } else {
                    write!(f, ", offsets are negative and the firmware will clip it")
                }
            }
            StructuralWarning::RowBufferExceeded { width, limit } => write!(
                f,
                "image width {} exceeds the firmware row buffer of {} pixels",
                width, limit
            ),
            StructuralWarning::RecordCapacityExceeded { count, limit } => write!(
                f,
                "{} records but the firmware only loads the first {}",
                count, limit
            ),
        }
    }
}
