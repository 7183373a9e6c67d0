//! Function-body slicing.
//!
//! Finds the signature line of the scanned function by prefix and collects
//! lines up to the first line that is exactly `}`. Brace depth is not
//! tracked, so the body must not contain a column-zero closing brace before
//! its end.

/// One line of the sliced body with its 0-based position in the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLine {
    pub index: usize,
    pub text: String,
}

/// Lines of the scanned function, plus what the slicer found.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FunctionBody {
    /// Signature line and body lines, in source order.
    pub lines: Vec<SourceLine>,
    /// Index of the signature line, if the marker was found.
    pub marker_line: Option<usize>,
    /// Whether a closing `}` line ended the slice before end of input.
    pub terminated: bool,
}

impl FunctionBody {
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn marker_found(&self) -> bool {
        self.marker_line.is_some()
    }
}

/// Slices the body of the function whose signature line starts with `marker`.
///
/// Returns an empty body when the marker never appears, and runs to end of
/// input when no closing-brace line follows it.
pub fn slice_function_body(source: &str, marker: &str) -> FunctionBody {
    let mut lines = source.lines().enumerate();

    let Some((marker_index, signature)) = lines.by_ref().find(|(_, line)| line.starts_with(marker))
    else {
        return FunctionBody::default();
    };

    let mut body = FunctionBody {
        lines: vec![SourceLine {
            index: marker_index,
            text: signature.to_string(),
        }],
        marker_line: Some(marker_index),
        terminated: false,
    };

    for (index, line) in lines {
        if line == "}" {
            body.terminated = true;
            break;
        }
        body.lines.push(SourceLine {
            index,
            text: line.to_string(),
        });
    }

    body
}
