/// Turbine wheel frames
const FRAMES: [&str; 4] = ["|", "\u{2044}", "\u{2013}", "\\"];

pub fn spinner(frame: usize) -> &'static str {
    FRAMES[frame % FRAMES.len()]
}
