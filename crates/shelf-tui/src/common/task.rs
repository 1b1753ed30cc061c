#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(pub u64);

#[derive(Debug, Default)]
pub struct TaskSeq {
    next: u64,
}

impl TaskSeq {
    pub fn next_id(&mut self) -> TaskId {
        let id = TaskId(self.next);
        self.next = self.next.wrapping_add(1);
        id
    }
}

/// Network operations guarded against concurrent duplicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskKind {
    SessionCheck,
    SignIn,
    ProductList,
    ProductSave,
    ProductDelete,
}

#[derive(Debug)]
pub struct TaskCompleted<E> {
    pub id: TaskId,
    pub result: E,
}

/// Task lifecycle state (stored in AppState, mutated only by reducer).
#[derive(Debug, Default, Clone)]
pub struct TaskState {
    pub active: Option<TaskId>,
}

impl TaskState {
    pub fn is_running(&self) -> bool {
        self.active.is_some()
    }

    pub fn finish_if_active(&mut self, id: TaskId) -> bool {
        let ok = self.active == Some(id);
        if ok {
            self.active = None;
        }
        ok
    }
}

#[derive(Debug, Default, Clone)]
pub struct Tasks {
    pub session_check: TaskState,
    pub sign_in: TaskState,
    pub product_list: TaskState,
    pub product_save: TaskState,
    pub product_delete: TaskState,
}

impl Tasks {
    pub fn state(&self, kind: TaskKind) -> &TaskState {
        match kind {
            TaskKind::SessionCheck => &self.session_check,
            TaskKind::SignIn => &self.sign_in,
            TaskKind::ProductList => &self.product_list,
            TaskKind::ProductSave => &self.product_save,
            TaskKind::ProductDelete => &self.product_delete,
        }
    }

    pub fn state_mut(&mut self, kind: TaskKind) -> &mut TaskState {
        match kind {
            TaskKind::SessionCheck => &mut self.session_check,
            TaskKind::SignIn => &mut self.sign_in,
            TaskKind::ProductList => &mut self.product_list,
            TaskKind::ProductSave => &mut self.product_save,
            TaskKind::ProductDelete => &mut self.product_delete,
        }
    }

    /// Marks `kind` as running under a fresh id.
    ///
    /// Returns `None` while a task of that kind is still outstanding.
    pub fn try_start(&mut self, seq: &mut TaskSeq, kind: TaskKind) -> Option<TaskId> {
        if self.state(kind).is_running() {
            return None;
        }
        Some(self.restart(seq, kind))
    }

    /// Marks `kind` as running under a fresh id, superseding any outstanding
    /// task of that kind. The superseded result is dropped on arrival.
    pub fn restart(&mut self, seq: &mut TaskSeq, kind: TaskKind) -> TaskId {
        let id = seq.next_id();
        self.state_mut(kind).active = Some(id);
        id
    }

    pub fn is_any_running(&self) -> bool {
        self.session_check.is_running()
            || self.sign_in.is_running()
            || self.product_list.is_running()
            || self.product_save.is_running()
            || self.product_delete.is_running()
    }

    pub fn clear_all(&mut self) {
        *self = Self::default();
    }
}
