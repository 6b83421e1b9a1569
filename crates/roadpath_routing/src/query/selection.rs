use crate::types::NodeId;

/// Start/end pick of the user, filled in click order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    Empty,
    One(NodeId),
    Two(NodeId, NodeId),
}

impl Selection {
    pub fn start(&self) -> Option<NodeId> {
        match *self {
            Selection::Empty => None,
            Selection::One(start) | Selection::Two(start, _) => Some(start),
        }
    }

    pub fn end(&self) -> Option<NodeId> {
        match *self {
            Selection::Two(_, end) => Some(end),
            _ => None,
        }
    }

    pub fn nodes(&self) -> Vec<NodeId> {
        match *self {
            Selection::Empty => vec![],
            Selection::One(start) => vec![start],
            Selection::Two(start, end) => vec![start, end],
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Selection::Empty => 0,
            Selection::One(_) => 1,
            Selection::Two(_, _) => 2,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Selection::Empty)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QueryState {
    /// Nothing selected
    #[default]
    Idle,
    /// Start selected, waiting for the end
    AwaitingSecond,
    /// Both selected, search dispatched but not published yet
    Computing,
    /// Both selected, result of exactly this pair published
    Ready,
}
