use rusqlite::Connection;

pub fn create_tables(conn: &Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(
        "
        -- Almacén clave/valor: secuencial, notas y bitácora por día, sesión y borrador
        CREATE TABLE IF NOT EXISTS almacen (
            clave TEXT PRIMARY KEY,
            valor TEXT NOT NULL,
            actualizado TEXT NOT NULL DEFAULT (datetime('now', 'localtime'))
        );
        ",
    )?;
    Ok(())
}
