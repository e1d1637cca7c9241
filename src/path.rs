use crate::error::PathDataError;
use crate::types::PathSegment;

/// Insert a space before every `-` that directly follows a digit, so that
/// compact data like `10-5` splits into two numbers.
fn separate_glued_minus(d: &str) -> String {
    let mut out = String::with_capacity(d.len() + 8);
    let mut prev: Option<char> = None;

    for c in d.chars() {
        if c == '-' && prev.is_some_and(|p| p.is_ascii_digit()) {
            out.push(' ');
        }
        out.push(c);
        prev = Some(c);
    }

    out.trim().to_string()
}

/// Letters that start a command. `e`/`E` belong to numbers.
fn is_command_letter(c: char) -> bool {
    c.is_ascii_alphabetic() && c != 'e' && c != 'E'
}

/// Split path data into command letters and the argument text following each.
///
/// Returns the text before the first command along with the aligned lists.
fn split_commands(d: &str) -> (&str, Vec<(char, &str)>) {
    let mut commands = Vec::new();
    let mut leading = d;
    let mut current: Option<(char, usize)> = None;

    for (i, c) in d.char_indices() {
        if !is_command_letter(c) {
            continue;
        }
        match current {
            Some((cmd, start)) => commands.push((cmd, &d[start..i])),
            None => leading = &d[..i],
        }
        current = Some((c, i + c.len_utf8()));
    }

    if let Some((cmd, start)) = current {
        commands.push((cmd, &d[start..]));
    }

    (leading, commands)
}

/// Split an argument chunk on whitespace and commas and parse every field.
/// Values that overflow `f32` are malformed.
fn parse_args(command: char, chunk: &str) -> Result<Vec<f32>, PathDataError> {
    chunk
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|s| !s.is_empty())
        .map(|token| match token.parse::<f32>() {
            Ok(n) if n.is_finite() => Ok(n),
            _ => Err(PathDataError::MalformedNumber {
                command,
                token: token.to_string(),
            }),
        })
        .collect()
}

/// Break `args` into groups of `arity`, rejecting a trailing partial group.
fn groups(
    command: char,
    args: &[f32],
    arity: usize,
) -> Result<std::slice::ChunksExact<'_, f32>, PathDataError> {
    if args.len() % arity != 0 {
        return Err(PathDataError::ArityMismatch {
            command,
            arity,
            count: args.len(),
        });
    }
    Ok(args.chunks_exact(arity))
}

/// Parse the `d` attribute of a path into its segments.
///
/// Supported commands are `M`, `L`, `H`, `V`, `C`, `A` and `Z` in both cases.
/// Every coordinate pair after `M` is another move, `H` and `V` take full
/// `x,y` pairs like `L`, and `C` with an argument count that is not a
/// multiple of six is read as quadratic curves in groups of four.
pub fn parse_path_data(d: &str) -> Result<Vec<PathSegment>, PathDataError> {
    let cleaned = separate_glued_minus(d);
    let (leading, commands) = split_commands(&cleaned);
    let mut segments = Vec::new();

    for &(cmd, chunk) in &commands {
        let absolute = cmd.is_ascii_uppercase();

        match cmd {
            'm' | 'M' => {
                let args = parse_args(cmd, chunk)?;
                for g in groups(cmd, &args, 2)? {
                    segments.push(PathSegment::MoveTo {
                        absolute,
                        x: g[0],
                        y: g[1],
                    });
                }
            }
            'l' | 'L' | 'h' | 'H' | 'v' | 'V' => {
                let args = parse_args(cmd, chunk)?;
                for g in groups(cmd, &args, 2)? {
                    segments.push(PathSegment::LineTo {
                        absolute,
                        x: g[0],
                        y: g[1],
                    });
                }
            }
            'c' | 'C' => {
                let args = parse_args(cmd, chunk)?;
                if args.len() % 6 == 0 {
                    for g in groups(cmd, &args, 6)? {
                        segments.push(PathSegment::CubicTo {
                            absolute,
                            c1x: g[0],
                            c1y: g[1],
                            c2x: g[2],
                            c2y: g[3],
                            x: g[4],
                            y: g[5],
                        });
                    }
                } else {
                    for g in groups(cmd, &args, 4)? {
                        segments.push(PathSegment::QuadTo {
                            absolute,
                            cx: g[0],
                            cy: g[1],
                            x: g[2],
                            y: g[3],
                        });
                    }
                }
            }
            'a' | 'A' => {
                let args = parse_args(cmd, chunk)?;
                for g in groups(cmd, &args, 7)? {
                    segments.push(PathSegment::ArcTo {
                        absolute,
                        rx: g[0],
                        ry: g[1],
                        x_axis_rotation: g[2],
                        large_arc: g[3] != 0.0,
                        sweep: g[4] != 0.0,
                        x: g[5],
                        y: g[6],
                    });
                }
            }
            'z' | 'Z' => segments.push(PathSegment::ClosePath),
            _ => return Err(PathDataError::UnknownCommand(cmd)),
        }
    }

    let leading = leading.trim();
    if !leading.is_empty() {
        return Err(PathDataError::UnconsumedData {
            count: 1,
            chunks: vec![leading.to_string()],
        });
    }

    Ok(segments)
}
