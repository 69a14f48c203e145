// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use timesheet_domain::EditPolicy;

/// Tunables for the transition engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WorkflowConfig {
    /// Which statuses block owner edits.
    pub edit_policy: EditPolicy,
}

impl WorkflowConfig {
    /// Creates a new `WorkflowConfig`.
    #[must_use]
    pub const fn new(edit_policy: EditPolicy) -> Self {
        Self { edit_policy }
    }
}
