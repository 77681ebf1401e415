//! Line-oriented text format for persisted motion graphs.
//!
//! ```text
//! # Graph Version 0.1
//! MotionNum 2
//! MotionLabel Walk frameNum 5
//! MotionLabel Run frameNum 4
//! MotionName Walk frame 0
//! MotionName Walk frame 4
//! MotionLink 0 1 1
//! MotionLink 1 0
//! ```
//!
//! The first line must match the version header exactly. Body lines are
//! tokenized on whitespace and the characters `, = : " { }`; lines starting
//! with `#` are comments; an empty line ends the body. Unknown leading
//! keywords are skipped, so readers tolerate sections they do not know.
//! Node ids are implicit: the n-th `MotionName` line defines node n, and
//! `MotionLink` destinations refer to those ids.

use std::{
    collections::BTreeMap,
    fs::File,
    io::{self, BufWriter, Read, Write},
    path::Path,
};

use bevy::log::{debug, info};
use indexmap::IndexMap;

use super::{Edge, FrameIndex, MotionGraph, MotionInfo, Node, NodeId};
use crate::errors::{GraphFormatError, GraphLoadError, SavingError};

pub const GRAPH_VERSION_HEADER: &str = "# Graph Version 0.1";

const TOKEN_DELIMITERS: &[char] = &[' ', '\t', ',', '=', ':', '"', '{', '}'];

impl MotionGraph {
    /// Writes the graph in the text format above.
    ///
    /// Motion labels are written as single tokens; a label containing a
    /// delimiter character would not survive a round trip.
    pub fn write_to<W: Write>(&self, mut w: W) -> io::Result<()> {
        writeln!(w, "{GRAPH_VERSION_HEADER}")?;
        writeln!(w, "MotionNum {}", self.motions.len())?;
        for m in &self.motions {
            writeln!(w, "MotionLabel {} frameNum {}", m.label, m.frame_count)?;
        }
        for node in &self.nodes {
            writeln!(w, "MotionName {} frame {}", node.label, node.frame)?;
        }
        for node in &self.nodes {
            write!(w, "MotionLink {} {}", node.id.0, node.edges.len())?;
            for edge in &node.edges {
                write!(w, " {}", edge.target.0)?;
            }
            writeln!(w)?;
        }
        Ok(())
    }

    /// Saves the graph to `path`, creating or truncating the file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SavingError> {
        let path = path.as_ref();
        info!("exporting graph file: {}", path.display());
        let mut w = BufWriter::new(File::create(path)?);
        self.write_to(&mut w)?;
        w.flush()?;
        Ok(())
    }

    /// Parses a graph from the text format.
    pub fn from_graph_text(src: &str) -> Result<Self, GraphFormatError> {
        let mut lines = src.lines();
        let header = lines.next().unwrap_or("");
        if header != GRAPH_VERSION_HEADER {
            return Err(GraphFormatError::BadHeader {
                found: header.to_owned(),
            });
        }

        let mut parser = GraphParser::default();
        for (number, line) in lines.enumerate() {
            // 1-based, counting the header line.
            let line_no = number + 2;
            if line.is_empty() {
                break;
            }

            let tokens: Vec<&str> = line
                .split(TOKEN_DELIMITERS)
                .filter(|t| !t.is_empty())
                .collect();
            let Some(&keyword) = tokens.first() else {
                continue;
            };
            if keyword.starts_with('#') {
                continue;
            }

            match keyword {
                "MotionNum" => parser.motion_num(line_no, &tokens)?,
                "MotionLabel" => parser.motion_label(line_no, &tokens)?,
                "MotionName" => parser.motion_name(line_no, &tokens)?,
                "MotionLink" => parser.motion_link(line_no, &tokens)?,
                // Unknown keywords are skipped.
                _ => {}
            }
        }

        let graph = parser.finish();
        info!(
            "loaded graph: {} motions, {} nodes",
            graph.motions.len(),
            graph.nodes.len()
        );
        Ok(graph)
    }

    /// Reads a graph from `r`.
    pub fn read_from<R: Read>(mut r: R) -> Result<Self, GraphLoadError> {
        let mut src = String::new();
        r.read_to_string(&mut src)?;
        Ok(Self::from_graph_text(&src)?)
    }

    /// Loads a graph from the file at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, GraphLoadError> {
        let path = path.as_ref();
        info!("loading graph: {}", path.display());
        Self::read_from(File::open(path)?)
    }
}

#[derive(Default)]
struct GraphParser {
    declared_motions: Option<usize>,
    motions: Vec<MotionInfo>,
    /// Label -> motion index, in order of appearance. The first occurrence of
    /// a label wins.
    labels: IndexMap<String, usize>,
    nodes: Vec<Node>,
}

impl GraphParser {
    fn motion_num(&mut self, line: usize, tokens: &[&str]) -> Result<(), GraphFormatError> {
        let count = parse_number(line, field(line, tokens, 1, "MotionNum")?)?;
        debug!("motionNum: {count}");
        self.declared_motions = Some(count);
        Ok(())
    }

    fn motion_label(&mut self, line: usize, tokens: &[&str]) -> Result<(), GraphFormatError> {
        let label = field(line, tokens, 1, "MotionLabel")?;
        if field(line, tokens, 2, "MotionLabel")? != "frameNum" {
            return Err(GraphFormatError::MalformedLine {
                line,
                keyword: "MotionLabel".to_owned(),
            });
        }
        let frame_count = parse_number(line, field(line, tokens, 3, "MotionLabel")?)?;

        if let Some(declared) = self.declared_motions
            && self.motions.len() == declared
        {
            return Err(GraphFormatError::TooManyMotions { line, declared });
        }

        debug!("motion label: {label}");
        self.labels
            .entry(label.to_owned())
            .or_insert(self.motions.len());
        self.motions.push(MotionInfo {
            label: label.to_owned(),
            frame_count,
        });
        Ok(())
    }

    fn motion_name(&mut self, line: usize, tokens: &[&str]) -> Result<(), GraphFormatError> {
        let label = field(line, tokens, 1, "MotionName")?;
        if field(line, tokens, 2, "MotionName")? != "frame" {
            return Err(GraphFormatError::MalformedLine {
                line,
                keyword: "MotionName".to_owned(),
            });
        }
        let frame = parse_number(line, field(line, tokens, 3, "MotionName")?)?;

        let Some(&motion) = self.labels.get(label) else {
            return Err(GraphFormatError::UnknownMotionLabel {
                line,
                label: label.to_owned(),
            });
        };
        if frame >= self.motions[motion].frame_count {
            return Err(GraphFormatError::FrameOutOfRange {
                line,
                frame,
                label: label.to_owned(),
            });
        }

        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::new(id, motion, frame, label));
        Ok(())
    }

    fn motion_link(&mut self, line: usize, tokens: &[&str]) -> Result<(), GraphFormatError> {
        let node = parse_number(line, field(line, tokens, 1, "MotionLink")?)?;
        let count = parse_number(line, field(line, tokens, 2, "MotionLink")?)?;

        if node >= self.nodes.len() {
            return Err(GraphFormatError::NodeOutOfRange {
                line,
                id: node,
                count: self.nodes.len(),
            });
        }
        for i in 0..count {
            let target = parse_number(line, field(line, tokens, 3 + i, "MotionLink")?)?;
            if target >= self.nodes.len() {
                return Err(GraphFormatError::NodeOutOfRange {
                    line,
                    id: target,
                    count: self.nodes.len(),
                });
            }
            self.nodes[node].add_edge(Edge::new(NodeId(target)));
        }
        Ok(())
    }

    fn finish(self) -> MotionGraph {
        let max_frames = self
            .motions
            .iter()
            .map(|m| m.frame_count)
            .max()
            .unwrap_or(0);
        let mut frame_index = FrameIndex::new(self.motions.len(), max_frames);
        let mut chains = vec![BTreeMap::new(); self.motions.len()];
        for node in &self.nodes {
            frame_index.assign(node.motion, node.frame, node.id);
            chains[node.motion].insert(node.frame, node.id);
        }

        MotionGraph {
            nodes: self.nodes,
            motions: self.motions,
            frame_index,
            chains,
        }
    }
}

fn field<'a>(
    line: usize,
    tokens: &[&'a str],
    index: usize,
    keyword: &str,
) -> Result<&'a str, GraphFormatError> {
    tokens.get(index).copied().ok_or_else(|| {
        GraphFormatError::MalformedLine {
            line,
            keyword: keyword.to_owned(),
        }
    })
}

fn parse_number(line: usize, token: &str) -> Result<usize, GraphFormatError> {
    token.parse().map_err(|_| GraphFormatError::InvalidNumber {
        line,
        value: token.to_owned(),
    })
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::error_map::{FramePair, TransitionCandidates};
    use crate::motion_clip::MotionClip;

    fn scenario_graph() -> MotionGraph {
        let clips = vec![MotionClip::new("Walk", 5), MotionClip::new("Run", 4)];
        let mut candidates = TransitionCandidates::new();
        candidates.add_relation("Walk", "Run", vec![FramePair::new(2, 1)]);
        MotionGraph::construct(&clips, &candidates).unwrap()
    }

    fn written(graph: &MotionGraph) -> String {
        let mut out = Vec::new();
        graph.write_to(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_written_sections_and_order() {
        let clips = vec![MotionClip::new("Walk", 5), MotionClip::new("Run", 4)];
        let graph = MotionGraph::from_motions(&clips).unwrap();

        assert_eq!(
            written(&graph),
            "# Graph Version 0.1\n\
             MotionNum 2\n\
             MotionLabel Walk frameNum 5\n\
             MotionLabel Run frameNum 4\n\
             MotionName Walk frame 0\n\
             MotionName Walk frame 4\n\
             MotionName Run frame 0\n\
             MotionName Run frame 3\n\
             MotionLink 0 1 1\n\
             MotionLink 1 0\n\
             MotionLink 2 1 3\n\
             MotionLink 3 0\n"
        );
    }

    #[test]
    fn test_round_trip_preserves_structure() {
        let graph = scenario_graph();
        let reloaded = MotionGraph::from_graph_text(&written(&graph)).unwrap();

        assert_eq!(reloaded.node_count(), graph.node_count());
        assert_eq!(reloaded.motions(), graph.motions());
        for (before, after) in graph.nodes().iter().zip(reloaded.nodes()) {
            assert_eq!(after.id, before.id);
            assert_eq!(after.motion, before.motion);
            assert_eq!(after.frame, before.frame);
            assert_eq!(after.label, before.label);
            let before_targets: Vec<_> = before.edges.iter().map(|e| e.target).collect();
            let after_targets: Vec<_> = after.edges.iter().map(|e| e.target).collect();
            assert_eq!(after_targets, before_targets);
        }
    }

    #[test]
    fn test_round_trip_preserves_queries() {
        let graph = scenario_graph();
        let reloaded = MotionGraph::from_graph_text(&written(&graph)).unwrap();

        assert_eq!(reloaded.node_id_at(0, 2), graph.node_id_at(0, 2));
        assert!(reloaded.has_transition(0, 2));
        assert!(!reloaded.has_transition(0, 1));
    }

    #[test]
    fn test_bad_header_is_rejected() {
        let result = MotionGraph::from_graph_text("# Graph Version 0.2\nMotionNum 0\n");

        assert!(matches!(
            result,
            Err(GraphFormatError::BadHeader { found }) if found == "# Graph Version 0.2"
        ));
    }

    #[test]
    fn test_empty_input_is_rejected() {
        assert!(matches!(
            MotionGraph::from_graph_text(""),
            Err(GraphFormatError::BadHeader { .. })
        ));
    }

    #[test]
    fn test_comments_and_unknown_keywords_are_skipped() {
        let graph = MotionGraph::from_graph_text(
            "# Graph Version 0.1\n\
             # a comment\n\
             MotionNum 1\n\
             Frobnicate 3 4\n\
             MotionLabel Walk frameNum 5\n\
             MotionName Walk frame 0\n\
             MotionLink 0 0\n",
        )
        .unwrap();

        assert_eq!(graph.node_count(), 1);
    }

    #[test]
    fn test_empty_line_ends_body() {
        let graph = MotionGraph::from_graph_text(
            "# Graph Version 0.1\n\
             MotionNum 1\n\
             MotionLabel Walk frameNum 5\n\
             MotionName Walk frame 0\n\
             \n\
             MotionName Walk frame 4\n",
        )
        .unwrap();

        assert_eq!(graph.node_count(), 1);
    }

    #[test]
    fn test_delimiter_characters_tokenize() {
        let graph = MotionGraph::from_graph_text(
            "# Graph Version 0.1\n\
             MotionNum=1\n\
             MotionLabel:Walk, frameNum:5\n\
             MotionName \"Walk\" frame 2\n\
             MotionLink {0} {0}\n",
        )
        .unwrap();

        assert_eq!(graph.node_count(), 1);
        assert_eq!(graph.node(NodeId(0)).frame, 2);
    }

    #[test]
    fn test_unknown_motion_label_is_an_error() {
        let result = MotionGraph::from_graph_text(
            "# Graph Version 0.1\n\
             MotionNum 1\n\
             MotionLabel Walk frameNum 5\n\
             MotionName Jump frame 0\n",
        );

        assert!(matches!(
            result,
            Err(GraphFormatError::UnknownMotionLabel { label, .. }) if label == "Jump"
        ));
    }

    #[test]
    fn test_frame_beyond_motion_length_is_an_error() {
        let result = MotionGraph::from_graph_text(
            "# Graph Version 0.1\n\
             MotionNum 1\n\
             MotionLabel Walk frameNum 5\n\
             MotionName Walk frame 5\n",
        );

        assert!(matches!(
            result,
            Err(GraphFormatError::FrameOutOfRange { frame: 5, .. })
        ));
    }

    #[test]
    fn test_link_target_out_of_range_is_an_error() {
        let result = MotionGraph::from_graph_text(
            "# Graph Version 0.1\n\
             MotionNum 1\n\
             MotionLabel Walk frameNum 5\n\
             MotionName Walk frame 0\n\
             MotionLink 0 1 3\n",
        );

        assert!(matches!(
            result,
            Err(GraphFormatError::NodeOutOfRange { id: 3, .. })
        ));
    }

    #[test]
    fn test_more_labels_than_declared_is_an_error() {
        let result = MotionGraph::from_graph_text(
            "# Graph Version 0.1\n\
             MotionNum 1\n\
             MotionLabel Walk frameNum 5\n\
             MotionLabel Run frameNum 4\n",
        );

        assert!(matches!(
            result,
            Err(GraphFormatError::TooManyMotions { declared: 1, .. })
        ));
    }

    #[test]
    fn test_duplicate_label_resolves_to_first_motion() {
        let graph = MotionGraph::from_graph_text(
            "# Graph Version 0.1\n\
             MotionNum 2\n\
             MotionLabel Walk frameNum 5\n\
             MotionLabel Walk frameNum 9\n\
             MotionName Walk frame 4\n",
        )
        .unwrap();

        assert_eq!(graph.node(NodeId(0)).motion, 0);
    }

    #[test]
    fn test_malformed_entry_is_an_error() {
        let result = MotionGraph::from_graph_text(
            "# Graph Version 0.1\n\
             MotionNum 1\n\
             MotionLabel Walk frames 5\n",
        );

        assert!(matches!(
            result,
            Err(GraphFormatError::MalformedLine { .. })
        ));
    }

    #[test]
    fn test_non_numeric_field_is_an_error() {
        let result = MotionGraph::from_graph_text(
            "# Graph Version 0.1\n\
             MotionNum many\n",
        );

        assert!(matches!(
            result,
            Err(GraphFormatError::InvalidNumber { value, .. }) if value == "many"
        ));
    }
}
