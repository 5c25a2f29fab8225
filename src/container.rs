use crate::animation::PollableState;
use crate::element::VisualElement;
use std::time::Duration;

/// A surface elements can be attached to.
pub trait Container<E> {
    /// Attach an element at the end of the container's children.
    fn append_child(&mut self, element: E);

    fn children(&self) -> &[E];
}

/// A named container holding elements in attachment order.
#[derive(Debug)]
pub struct Layer<E> {
    id: String,
    children: Vec<E>,
}

impl<E: VisualElement> Layer<E> {
    pub fn new<S: Into<String>>(id: S) -> Self {
        Self { id: id.into(), children: Vec::new() }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Advance the animations of every child to `now`.
    pub fn tick(&self, now: Duration) -> PollableState {
        self.children.iter().fold(PollableState::Unmodified, |state, child| match child.poll(now) {
            PollableState::Unmodified => state,
            _ => PollableState::Modified,
        })
    }
}

impl<E> Container<E> for Layer<E> {
    fn append_child(&mut self, element: E) {
        self.children.push(element);
    }

    fn children(&self) -> &[E] {
        &self.children
    }
}

/// Every container on screen, addressable by id.
#[derive(Debug)]
pub struct Stage<E> {
    layers: Vec<Layer<E>>,
}

impl<E: VisualElement> Default for Stage<E> {
    fn default() -> Self {
        Self { layers: Vec::new() }
    }
}

impl<E: VisualElement> Stage<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a container with the given id, or return the existing one.
    pub fn add_container(&mut self, id: &str) -> &mut Layer<E> {
        let index = match self.layers.iter().position(|layer| layer.id == id) {
            Some(index) => index,
            None => {
                self.layers.push(Layer::new(id));
                self.layers.len() - 1
            }
        };
        &mut self.layers[index]
    }

    pub fn container(&self, id: &str) -> Option<&Layer<E>> {
        self.layers.iter().find(|layer| layer.id == id)
    }

    pub fn container_mut(&mut self, id: &str) -> Option<&mut Layer<E>> {
        self.layers.iter_mut().find(|layer| layer.id == id)
    }

    /// Tear a container down, handing back its elements.
    pub fn remove_container(&mut self, id: &str) -> Option<Layer<E>> {
        let index = self.layers.iter().position(|layer| layer.id == id)?;
        Some(self.layers.remove(index))
    }

    /// All containers in creation order.
    pub fn layers(&self) -> &[Layer<E>] {
        &self.layers
    }

    /// Advance every element on the stage to `now`.
    pub fn tick(&self, now: Duration) -> PollableState {
        self.layers.iter().fold(PollableState::Unmodified, |state, layer| match layer.tick(now) {
            PollableState::Unmodified => state,
            _ => PollableState::Modified,
        })
    }
}
