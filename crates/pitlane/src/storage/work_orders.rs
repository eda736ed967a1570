//! Work order and work assignment queries.

use std::collections::HashMap;

use rusqlite::Row;

use super::{ListQuery, Page, Storage, Table};
use crate::error::Result;
use crate::model::{WorkAssignment, WorkOrder};

const WORK_ORDERS: Table = Table {
    name: "work order",
    select: "wo.work_order_id, wo.car_id, c.car_number, wo.session_id, wo.description, \
             wo.created_at, wo.completed_at",
    from: "work_order wo JOIN car c ON c.car_id = wo.car_id",
    key: "wo.work_order_id",
    fields: &[
        ("work_order_id", "wo.work_order_id"),
        ("car", "wo.car_id"),
        ("car_number", "c.car_number"),
        ("session", "wo.session_id"),
        ("description", "wo.description"),
        ("created_at", "wo.created_at"),
        ("completed_at", "wo.completed_at"),
    ],
};

const WORK_ASSIGNMENTS: Table = Table {
    name: "work assignment",
    select: "wa.work_assignment_id, wa.work_order_id, wa.person_id, \
             pe.first_name || ' ' || pe.last_name, wa.role",
    from: "work_assignment wa JOIN person pe ON pe.person_id = wa.person_id",
    key: "wa.work_assignment_id",
    fields: &[
        ("work_assignment_id", "wa.work_assignment_id"),
        ("work_order", "wa.work_order_id"),
        ("person", "wa.person_id"),
        ("person_name", "pe.first_name || ' ' || pe.last_name"),
        ("role", "wa.role"),
    ],
};

impl Storage {
    /// List work orders, each with its assignments.
    ///
    /// # Errors
    ///
    /// Returns an error if the query names an unknown field or the database operation fails.
    pub fn list_work_orders(&self, query: &ListQuery) -> Result<Page<WorkOrder>> {
        let mut page = self.fetch_page(&WORK_ORDERS, query, row_to_work_order)?;
        self.attach_assignments(&mut page.results)?;
        Ok(page)
    }

    /// Get a work order with its assignments.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::NotFound`] if no such work order exists.
    pub fn get_work_order(&self, id: i64) -> Result<WorkOrder> {
        let mut order = self.fetch_one(&WORK_ORDERS, id, row_to_work_order)?;
        self.attach_assignments(std::slice::from_mut(&mut order))?;
        Ok(order)
    }

    /// List work assignments with the assignee's name.
    ///
    /// # Errors
    ///
    /// Returns an error if the query names an unknown field or the database operation fails.
    pub fn list_work_assignments(&self, query: &ListQuery) -> Result<Page<WorkAssignment>> {
        self.fetch_page(&WORK_ASSIGNMENTS, query, row_to_assignment)
    }

    /// Get a work assignment by id.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::NotFound`] if no such assignment exists.
    pub fn get_work_assignment(&self, id: i64) -> Result<WorkAssignment> {
        self.fetch_one(&WORK_ASSIGNMENTS, id, row_to_assignment)
    }

    fn attach_assignments(&self, orders: &mut [WorkOrder]) -> Result<()> {
        let ids: Vec<i64> = orders.iter().map(|o| o.work_order_id).collect();
        let assignments = self.fetch_in(
            &WORK_ASSIGNMENTS,
            "wa.work_order_id",
            &ids,
            " ORDER BY wa.work_assignment_id",
            row_to_assignment,
        )?;

        let mut by_order: HashMap<i64, Vec<WorkAssignment>> = HashMap::new();
        for assignment in assignments {
            by_order
                .entry(assignment.work_order_id)
                .or_default()
                .push(assignment);
        }
        for order in orders {
            order.assignments = by_order.remove(&order.work_order_id).unwrap_or_default();
        }
        Ok(())
    }
}

fn row_to_work_order(row: &Row<'_>) -> rusqlite::Result<WorkOrder> {
    Ok(WorkOrder {
        work_order_id: row.get(0)?,
        car_id: row.get(1)?,
        car_number: row.get(2)?,
        session_id: row.get(3)?,
        description: row.get(4)?,
        created_at: row.get(5)?,
        completed_at: row.get(6)?,
        assignments: Vec::new(),
    })
}

fn row_to_assignment(row: &Row<'_>) -> rusqlite::Result<WorkAssignment> {
    Ok(WorkAssignment {
        work_assignment_id: row.get(0)?,
        work_order_id: row.get(1)?,
        person_id: row.get(2)?,
        person_name: row.get(3)?,
        role: row.get(4)?,
    })
}
