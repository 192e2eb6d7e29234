use crate::Coord;
use crate::direction::Direction;
use crate::grid::Grid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Agent {
    pub x: Coord,
    pub y: Coord,
    pub direction: Direction,
}

impl Agent {
    pub fn new(x: Coord, y: Coord, direction: Direction) -> Self {
        Self { x, y, direction }
    }

    /// An agent that walked off the grid stays where it is and never acts again.
    pub fn is_inert_on(&self, grid: &Grid) -> bool {
        !grid.contains(self.x, self.y)
    }

    /// Move one cell along the current facing
    pub fn advance(&mut self) {
        let (dx, dy) = self.direction.offset();

        self.x += dx;
        self.y += dy;
    }
}

/// The live agents, kept in the order they were added. Agents are never removed during a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Agents {
    agents: Vec<Agent>,
}

impl Agents {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an agent facing up at `(x, y)`, unless one is already there.
    ///
    /// Returns whether an agent was added.
    pub fn spawn(&mut self, x: Coord, y: Coord) -> bool {
        if self.occupied(x, y) {
            return false;
        }

        self.agents.push(Agent::new(x, y, Direction::Up));

        true
    }

    pub fn occupied(&self, x: Coord, y: Coord) -> bool {
        self.agents.iter().any(|a| a.x == x && a.y == y)
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Agent> {
        self.agents.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Agent> {
        self.agents.iter_mut()
    }
}

impl From<Vec<Agent>> for Agents {
    fn from(agents: Vec<Agent>) -> Self {
        Self { agents }
    }
}

impl<'a> IntoIterator for &'a Agents {
    type Item = &'a Agent;
    type IntoIter = std::slice::Iter<'a, Agent>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::Agent;
    use super::Agents;
    use crate::color::Color;
    use crate::direction::Direction;
    use crate::grid::Grid;

    #[test]
    fn spawn_faces_up() {
        let mut agents = Agents::new();

        assert!(agents.spawn(3, 4));
        assert_eq!(
            agents.iter().next(),
            Some(&Agent::new(3, 4, Direction::Up))
        );
    }

    #[test]
    fn spawn_twice_is_noop() {
        let mut agents = Agents::new();

        assert!(agents.spawn(1, 1));
        assert!(!agents.spawn(1, 1));
        assert_eq!(agents.len(), 1);
    }

    #[test]
    fn insertion_order() {
        let mut agents = Agents::new();
        agents.spawn(2, 0);
        agents.spawn(0, 0);
        agents.spawn(1, 0);

        let xs: Vec<_> = agents.iter().map(|a| a.x).collect();
        assert_eq!(xs, [2, 0, 1]);
    }

    #[test]
    fn advance_and_inert() {
        let grid = Grid::new(2, 2, Color::White);
        let mut agent = Agent::new(0, 0, Direction::Left);

        assert!(!agent.is_inert_on(&grid));

        agent.advance();

        assert_eq!((agent.x, agent.y), (-1, 0));
        assert!(agent.is_inert_on(&grid));
    }
}
