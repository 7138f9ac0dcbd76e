use ecoliste_shared::models::Enterprise;
use redb::{Database, ReadableDatabase, ReadableTable, ReadableTableMetadata, TableDefinition};
use std::path::{Path, PathBuf};
use std::sync::Arc;

const ENTERPRISES_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("enterprises");

pub struct Storage {
    db: Database,
    path: PathBuf,
}

impl Storage {
    pub fn open(path: &Path) -> Arc<Self> {
        let db = Database::create(path)
            .unwrap_or_else(|e| panic!("Failed to open database at {}: {}", path.display(), e));

        // Ensure table exists
        let write_txn = db.begin_write().expect("Failed to begin write txn");
        {
            let _ = write_txn.open_table(ENTERPRISES_TABLE);
        }
        write_txn.commit().expect("Failed to commit initial txn");

        Arc::new(Storage {
            db,
            path: path.to_path_buf(),
        })
    }

    pub fn save_enterprise(&self, enterprise: &Enterprise) -> Result<(), String> {
        let json = serde_json::to_vec(enterprise).map_err(|e| e.to_string())?;
        let id_str = enterprise.id.to_string();

        let write_txn = self.db.begin_write().map_err(|e| e.to_string())?;
        {
            let mut table = write_txn
                .open_table(ENTERPRISES_TABLE)
                .map_err(|e| e.to_string())?;
            table
                .insert(id_str.as_str(), json.as_slice())
                .map_err(|e| e.to_string())?;
        }
        write_txn.commit().map_err(|e| e.to_string())?;
        Ok(())
    }

    pub fn get_enterprise(&self, id: &str) -> Result<Option<Enterprise>, String> {
        let read_txn = self.db.begin_read().map_err(|e| e.to_string())?;
        let table = read_txn
            .open_table(ENTERPRISES_TABLE)
            .map_err(|e| e.to_string())?;

        match table.get(id).map_err(|e| e.to_string())? {
            Some(value) => {
                let enterprise: Enterprise =
                    serde_json::from_slice(value.value()).map_err(|e| e.to_string())?;
                Ok(Some(enterprise))
            }
            None => Ok(None),
        }
    }

    pub fn list_enterprises(&self) -> Result<Vec<Enterprise>, String> {
        let read_txn = self.db.begin_read().map_err(|e| e.to_string())?;
        let table = read_txn
            .open_table(ENTERPRISES_TABLE)
            .map_err(|e| e.to_string())?;

        let mut enterprises = Vec::new();
        for item in table.iter().map_err(|e| e.to_string())? {
            let (_, value) = item.map_err(|e| e.to_string())?;
            let enterprise: Enterprise =
                serde_json::from_slice(value.value()).map_err(|e| e.to_string())?;
            enterprises.push(enterprise);
        }
        // Stable page ordering regardless of key order
        enterprises.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(enterprises)
    }

    pub fn count_enterprises(&self) -> Result<u64, String> {
        let read_txn = self.db.begin_read().map_err(|e| e.to_string())?;
        let table = read_txn
            .open_table(ENTERPRISES_TABLE)
            .map_err(|e| e.to_string())?;
        table.len().map_err(|e| e.to_string())
    }

    pub fn db_size_bytes(&self) -> Result<u64, String> {
        std::fs::metadata(&self.path)
            .map(|m| m.len())
            .map_err(|e| e.to_string())
    }

    pub fn delete_enterprise(&self, id: &str) -> Result<bool, String> {
        let write_txn = self.db.begin_write().map_err(|e| e.to_string())?;
        let removed = {
            let mut table = write_txn
                .open_table(ENTERPRISES_TABLE)
                .map_err(|e| e.to_string())?;
            let result = table.remove(id).map_err(|e| e.to_string())?;
            result.is_some()
        };
        write_txn.commit().map_err(|e| e.to_string())?;
        Ok(removed)
    }

    /// Load seed enterprises on first run only.
    pub fn seed_if_empty(&self, seed: &[Enterprise]) -> Result<usize, String> {
        if self.count_enterprises()? > 0 || seed.is_empty() {
            return Ok(0);
        }
        for enterprise in seed {
            self.save_enterprise(enterprise)?;
        }
        tracing::info!(count = seed.len(), "Seeded enterprise database");
        Ok(seed.len())
    }
}
