//! The Page Router: the core of the pipeline. Pages arrive one
//! at a time, in file order, off the Page Segmenter; whichever of "the page
//! arrives" or "something asks for that page" happens second triggers
//! decoding. This module also folds in the Row Grouper, since both
//! share the same `Rc<RefCell<Engine>>` to stay lazy without copying rows.

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::io::Cursor;
use std::rc::Rc;

use byteorder::{BigEndian, ReadBytesExt};
use log::{debug, trace, warn};

use crate::byte_reader::ByteReader;
use crate::dbheader::{self, DbHeader};
use crate::error::Error;
use crate::record;
use crate::schema::{self, ColumnDef};
use crate::sql_value::SqlValue;
use crate::varint::read_varint;

const TABLE_LEAF: u8 = 0x0D;
const TABLE_INTERIOR: u8 = 0x05;
const INDEX_LEAF: u8 = 0x0A;
const INDEX_INTERIOR: u8 = 0x02;

const SCHEMA_ROOT_PAGE: u32 = 1;

/// A table's identity and column descriptors, shared via `Rc` by every row
/// that belongs to it so the Row Grouper can tell groups apart by pointer
/// identity alone.
#[derive(Debug)]
pub struct TableCtx {
    pub name: String,
    pub columns: Vec<ColumnDef>,
    is_schema: bool,
}

fn schema_ctx() -> Rc<TableCtx> {
    let columns = vec![
        ColumnDef { cid: 0, name: "type".into(), r#type: "text".into(), notnull: false, dflt_value: None, pk: 0 },
        ColumnDef { cid: 1, name: "name".into(), r#type: "text".into(), notnull: false, dflt_value: None, pk: 0 },
        ColumnDef { cid: 2, name: "tbl_name".into(), r#type: "text".into(), notnull: false, dflt_value: None, pk: 0 },
        ColumnDef { cid: 3, name: "rootpage".into(), r#type: "integer".into(), notnull: false, dflt_value: None, pk: 0 },
        ColumnDef { cid: 4, name: "sql".into(), r#type: "text".into(), notnull: false, dflt_value: None, pk: 0 },
    ];
    Rc::new(TableCtx { name: "sqlite_schema".into(), columns, is_schema: true })
}

/// The page a resumed leaf-cell loop needs to pick back up: which table, the
/// page bytes, the cell pointer array already parsed out of it, shared via
/// `Rc` so suspending doesn't copy anything.
struct LeafOwner {
    ctx: Rc<TableCtx>,
    page: Rc<[u8]>,
    cell_pointers: Rc<[u16]>,
}

/// In-flight overflow chain reassembly for a single cell's payload.
struct OverflowState {
    owner: Rc<LeafOwner>,
    resume_from: usize,
    payload: Vec<u8>,
    remaining: usize,
}

/// What to do with a page once it (and whatever it's waiting on) is ready.
/// Registered against a page number via `Engine::dispatch`, exactly like
/// every other variant — overflow reassembly is not a special case of the
/// rendezvous mechanism, it's a tagged use of it.
enum Processor {
    TablePage(Rc<TableCtx>),
    IndexPage,
    FreelistTrunk,
    FreelistLeaf,
    Overflow(Box<OverflowState>),
}

struct BtreeHeader {
    page_type: u8,
    cell_pointers: Vec<u16>,
    right_most_pointer: Option<u32>,
}

fn malformed(msg: impl Into<String>) -> Error {
    Error::MalformedRecord(msg.into())
}

fn parse_btree_header(page: &[u8], header_start: usize) -> Result<BtreeHeader, Error> {
    let page_type = *page
        .get(header_start)
        .ok_or_else(|| malformed("btree page header ran past the end of its page"))?;
    let is_interior = matches!(page_type, INDEX_INTERIOR | TABLE_INTERIOR);

    let rest = page
        .get(header_start + 1..)
        .ok_or_else(|| malformed("btree page header ran past the end of its page"))?;
    let mut c = Cursor::new(rest);
    let _first_freeblock = c.read_u16::<BigEndian>().map_err(|_| malformed("truncated btree header"))?;
    let num_cells = c.read_u16::<BigEndian>().map_err(|_| malformed("truncated btree header"))?;
    let _content_start = c.read_u16::<BigEndian>().map_err(|_| malformed("truncated btree header"))?;
    let _fragmented_free_bytes = c.read_u8().map_err(|_| malformed("truncated btree header"))?;
    let right_most_pointer = if is_interior {
        Some(c.read_u32::<BigEndian>().map_err(|_| malformed("truncated btree interior header"))?)
    } else {
        None
    };

    let cell_ptr_array_start = header_start + if is_interior { 12 } else { 8 };
    let array_bytes = page
        .get(cell_ptr_array_start..)
        .ok_or_else(|| malformed("cell pointer array ran past the end of its page"))?;
    let mut cp = Cursor::new(array_bytes);
    let mut cell_pointers = Vec::with_capacity(num_cells as usize);
    for _ in 0..num_cells {
        cell_pointers.push(
            cp.read_u16::<BigEndian>()
                .map_err(|_| malformed("cell pointer array ran past the end of its page"))?,
        );
    }

    Ok(BtreeHeader { page_type, cell_pointers, right_most_pointer })
}

/// The largest payload prefix SQLite stores inline on a table-leaf page
/// before spilling the rest into an overflow chain.
fn local_payload_size(payload_size: usize, page_size: u32) -> usize {
    let u = page_size as i64;
    let max_local = u - 35;
    let min_local = (u - 12) * 32 / 255 - 23;
    let payload_size = payload_size as i64;

    let local = if payload_size <= max_local {
        payload_size
    } else {
        let k = min_local + (payload_size - min_local) % (u - 4);
        if k <= max_local { k } else { min_local }
    };
    local as usize
}

/// Drives the whole pipeline. Owns the byte source, the current page-buffer
/// / pending-processor rendezvous maps, and the queue of fully-decoded rows
/// waiting to be handed to a caller.
struct Engine<C> {
    reader: ByteReader<C>,
    buffer_size: usize,
    header: Option<DbHeader>,
    page1_prefix: Option<Vec<u8>>,
    next_page_num: u32,
    buffered_pages: HashMap<u32, Rc<[u8]>>,
    buffered_bytes: usize,
    pending_processors: HashMap<u32, Processor>,
    row_queue: VecDeque<(Rc<TableCtx>, Vec<SqlValue>)>,
    done: bool,
    errored: bool,
}

impl<C: Iterator<Item = Vec<u8>>> Engine<C> {
    fn new(chunks: C, buffer_size: usize) -> Self {
        Engine {
            reader: ByteReader::new(chunks),
            buffer_size,
            header: None,
            page1_prefix: None,
            next_page_num: 1,
            buffered_pages: HashMap::new(),
            buffered_bytes: 0,
            pending_processors: HashMap::new(),
            row_queue: VecDeque::new(),
            done: false,
            errored: false,
        }
    }

    fn ensure_header(&mut self) -> Result<(), Error> {
        if self.header.is_some() {
            return Ok(());
        }
        let header_bytes = self.reader.take(dbheader::HEADER_LEN)?;
        let header = dbheader::parse(&header_bytes)?;
        debug!(
            "parsed header: page_size={} num_pages={}",
            header.page_size, header.num_pages
        );
        self.page1_prefix = Some(header_bytes);
        self.header = Some(header);
        self.dispatch(SCHEMA_ROOT_PAGE, Processor::TablePage(schema_ctx()))?;
        if header.first_freelist_trunk != 0 {
            self.dispatch(header.first_freelist_trunk, Processor::FreelistTrunk)?;
        }
        Ok(())
    }

    fn fetch_next_page(&mut self) -> Option<Result<(u32, Rc<[u8]>), Error>> {
        let header = self.header.expect("header parsed before any page fetch");
        if self.next_page_num > header.num_pages {
            return None;
        }
        let page_num = self.next_page_num;
        self.next_page_num += 1;

        let page_size = header.page_size as usize;
        let result = if page_num == SCHEMA_ROOT_PAGE {
            let prefix = self.page1_prefix.take().expect("page1 prefix set by ensure_header");
            self.reader.take(page_size - prefix.len()).map(|rest| {
                let mut bytes = prefix;
                bytes.extend_from_slice(&rest);
                bytes
            })
        } else {
            self.reader.take(page_size)
        };

        Some(result.map(|bytes| (page_num, Rc::from(bytes.into_boxed_slice()))))
    }

    fn dispatch(&mut self, page_num: u32, processor: Processor) -> Result<(), Error> {
        if let Some(bytes) = self.buffered_pages.remove(&page_num) {
            self.buffered_bytes -= bytes.len();
            self.apply(page_num, bytes, processor)
        } else {
            trace!("page {page_num} not yet arrived, registering processor");
            self.pending_processors.insert(page_num, processor);
            Ok(())
        }
    }

    fn handle_arrived_page(&mut self, page_num: u32, bytes: Rc<[u8]>) -> Result<(), Error> {
        if let Some(processor) = self.pending_processors.remove(&page_num) {
            self.apply(page_num, bytes, processor)
        } else {
            self.buffer_page(page_num, bytes)
        }
    }

    fn buffer_page(&mut self, page_num: u32, bytes: Rc<[u8]>) -> Result<(), Error> {
        let projected = self.buffered_bytes + bytes.len();
        if projected > self.buffer_size {
            return Err(Error::BufferExceeded(self.buffer_size));
        }
        if projected > self.buffer_size * 3 / 4 {
            warn!("page buffer at {projected}/{} bytes", self.buffer_size);
        }
        self.buffered_bytes = projected;
        trace!("buffering page {page_num} ({} bytes)", bytes.len());
        self.buffered_pages.insert(page_num, bytes);
        Ok(())
    }

    fn apply(&mut self, page_num: u32, page: Rc<[u8]>, processor: Processor) -> Result<(), Error> {
        match processor {
            Processor::TablePage(ctx) => self.apply_table_page(page_num, page, ctx),
            Processor::IndexPage => self.apply_index_page(page_num, page),
            Processor::FreelistTrunk => self.apply_freelist_trunk(page),
            Processor::FreelistLeaf => Ok(()),
            Processor::Overflow(state) => self.apply_overflow(state, page),
        }
    }

    fn header_start(page_num: u32) -> usize {
        if page_num == SCHEMA_ROOT_PAGE { 100 } else { 0 }
    }

    fn apply_table_page(&mut self, page_num: u32, page: Rc<[u8]>, ctx: Rc<TableCtx>) -> Result<(), Error> {
        let hdr = parse_btree_header(&page, Self::header_start(page_num))?;
        match hdr.page_type {
            TABLE_LEAF => {
                let cell_pointers: Rc<[u16]> = Rc::from(hdr.cell_pointers.into_boxed_slice());
                self.resume_leaf(ctx, page, cell_pointers, 0)
            }
            TABLE_INTERIOR => {
                for offset in &hdr.cell_pointers {
                    let child = read_child_pointer(&page, *offset as usize)?;
                    self.dispatch(child, Processor::TablePage(ctx.clone()))?;
                }
                if let Some(right) = hdr.right_most_pointer {
                    self.dispatch(right, Processor::TablePage(ctx))?;
                }
                Ok(())
            }
            other => Err(malformed(format!("page {page_num} is not a table btree page (type {other})"))),
        }
    }

    fn apply_index_page(&mut self, page_num: u32, page: Rc<[u8]>) -> Result<(), Error> {
        let hdr = parse_btree_header(&page, Self::header_start(page_num))?;
        match hdr.page_type {
            INDEX_LEAF => Ok(()),
            INDEX_INTERIOR => {
                for offset in &hdr.cell_pointers {
                    let child = read_child_pointer(&page, *offset as usize)?;
                    self.dispatch(child, Processor::IndexPage)?;
                }
                if let Some(right) = hdr.right_most_pointer {
                    self.dispatch(right, Processor::IndexPage)?;
                }
                Ok(())
            }
            other => Err(malformed(format!("page {page_num} is not an index btree page (type {other})"))),
        }
    }

    fn apply_freelist_trunk(&mut self, page: Rc<[u8]>) -> Result<(), Error> {
        let mut c = Cursor::new(&page[..]);
        let next_trunk = c.read_u32::<BigEndian>().map_err(|_| malformed("truncated freelist trunk page"))?;
        let count = c.read_u32::<BigEndian>().map_err(|_| malformed("truncated freelist trunk page"))?;
        for _ in 0..count {
            let leaf = c.read_u32::<BigEndian>().map_err(|_| malformed("truncated freelist trunk page"))?;
            self.dispatch(leaf, Processor::FreelistLeaf)?;
        }
        if next_trunk != 0 {
            self.dispatch(next_trunk, Processor::FreelistTrunk)?;
        }
        Ok(())
    }

    fn resume_leaf(
        &mut self,
        ctx: Rc<TableCtx>,
        page: Rc<[u8]>,
        cell_pointers: Rc<[u16]>,
        start: usize,
    ) -> Result<(), Error> {
        let page_size = self.header.expect("header parsed").page_size;

        for i in start..cell_pointers.len() {
            let offset = cell_pointers[i] as usize;
            let (payload_size, w1) = read_varint(page.get(offset..).ok_or_else(|| malformed("cell offset past page end"))?)?;
            let rowid_start = offset.checked_add(w1).ok_or_else(|| malformed("cell offset overflowed"))?;
            let (_rowid, w2) = read_varint(
                page.get(rowid_start..)
                    .ok_or_else(|| malformed("cell offset past page end"))?,
            )?;
            let payload_start = rowid_start
                .checked_add(w2)
                .ok_or_else(|| malformed("cell offset overflowed"))?;
            let payload_size = payload_size as usize;
            let local_len = local_payload_size(payload_size, page_size);

            if payload_size <= local_len {
                let payload_end = payload_start
                    .checked_add(payload_size)
                    .ok_or_else(|| malformed("cell payload length overflowed"))?;
                let bytes = page
                    .get(payload_start..payload_end)
                    .ok_or_else(|| malformed("cell payload ran past the end of its page"))?;
                let values = record::decode_record(bytes)?;
                self.finish_row(ctx.clone(), values)?;
                continue;
            }

            let local_end = payload_start
                .checked_add(local_len)
                .ok_or_else(|| malformed("cell payload length overflowed"))?;
            let local_bytes = page
                .get(payload_start..local_end)
                .ok_or_else(|| malformed("cell payload ran past the end of its page"))?
                .to_vec();
            let ptr_off = local_end;
            let overflow_page = read_child_pointer(&page, ptr_off)?;

            let owner = Rc::new(LeafOwner { ctx, page, cell_pointers });
            let state = OverflowState {
                owner,
                resume_from: i + 1,
                payload: local_bytes,
                remaining: payload_size - local_len,
            };
            trace!("cell {i} spills into overflow chain starting at page {overflow_page}");
            return self.dispatch(overflow_page, Processor::Overflow(Box::new(state)));
        }
        Ok(())
    }

    fn apply_overflow(&mut self, mut state: Box<OverflowState>, page: Rc<[u8]>) -> Result<(), Error> {
        if page.len() < 4 {
            return Err(malformed("overflow page shorter than its required 4-byte header"));
        }
        let next = u32::from_be_bytes([page[0], page[1], page[2], page[3]]);
        let available = page.len() - 4;
        let take = available.min(state.remaining);
        state.payload.extend_from_slice(&page[4..4 + take]);
        state.remaining -= take;

        if state.remaining > 0 {
            if next == 0 {
                return Err(malformed("overflow chain ended before its payload was fully read"));
            }
            return self.dispatch(next, Processor::Overflow(state));
        }

        let values = record::decode_record(&state.payload)?;
        let owner = state.owner;
        self.finish_row(owner.ctx.clone(), values)?;
        self.resume_leaf(owner.ctx.clone(), owner.page.clone(), owner.cell_pointers.clone(), state.resume_from)
    }

    fn finish_row(&mut self, ctx: Rc<TableCtx>, values: Vec<SqlValue>) -> Result<(), Error> {
        if ctx.is_schema {
            self.handle_schema_row(values)
        } else {
            self.row_queue.push_back((ctx, values));
            Ok(())
        }
    }

    fn handle_schema_row(&mut self, values: Vec<SqlValue>) -> Result<(), Error> {
        if values.len() < 5 {
            return Err(malformed("sqlite_schema row had fewer than 5 columns"));
        }
        let kind = text_or(&values[0], "")?;
        let name = text_or(&values[1], "")?;
        let rootpage = match &values[3] {
            SqlValue::Integer(n) => *n as u32,
            SqlValue::Null => 0,
            _ => return Err(malformed("sqlite_schema.rootpage was not an integer")),
        };

        match kind.as_str() {
            "table" => {
                let sql = text_or(&values[4], "")?;
                let columns = schema::parse_create_table(&sql)
                    .map_err(|source| Error::SchemaParse { table: name.clone(), source })?;
                debug!("discovered table {name:?} at root page {rootpage}");
                let ctx = Rc::new(TableCtx { name, columns, is_schema: false });
                self.dispatch(rootpage, Processor::TablePage(ctx))
            }
            "index" if rootpage != 0 => {
                debug!("discovered index {name:?} at root page {rootpage}, skipping traversal");
                self.dispatch(rootpage, Processor::IndexPage)
            }
            _ => Ok(()),
        }
    }

    /// Pulls the next fully-decoded row, driving page fetches until one is
    /// ready, the stream ends cleanly, or something goes wrong. After an
    /// error, every subsequent call returns `None`.
    fn pull(&mut self) -> Option<Result<(Rc<TableCtx>, Vec<SqlValue>), Error>> {
        if self.errored {
            return None;
        }
        loop {
            if let Some(row) = self.row_queue.pop_front() {
                return Some(Ok(row));
            }
            if self.done {
                return None;
            }
            if self.header.is_none() {
                if let Err(e) = self.ensure_header() {
                    self.errored = true;
                    return Some(Err(e));
                }
                continue;
            }
            match self.fetch_next_page() {
                Some(Ok((num, bytes))) => {
                    if let Err(e) = self.handle_arrived_page(num, bytes) {
                        self.errored = true;
                        return Some(Err(e));
                    }
                }
                Some(Err(e)) => {
                    self.errored = true;
                    return Some(Err(e));
                }
                None => {
                    if !self.pending_processors.is_empty() || !self.buffered_pages.is_empty() {
                        self.errored = true;
                        return Some(Err(Error::UnusedPage));
                    }
                    self.done = true;
                }
            }
        }
    }
}

fn read_child_pointer(page: &[u8], offset: usize) -> Result<u32, Error> {
    let bytes = page
        .get(offset..offset + 4)
        .ok_or_else(|| malformed("child page pointer ran past the end of its page"))?;
    Ok(u32::from_be_bytes(bytes.try_into().unwrap()))
}

fn text_or(value: &SqlValue, default: &str) -> Result<String, Error> {
    match value {
        SqlValue::Text(s) => Ok(s.clone()),
        SqlValue::Null => Ok(default.to_string()),
        _ => Err(malformed("sqlite_schema text column held a non-text value")),
    }
}

/// One table's name, column descriptors, and its lazily-pulled rows.
pub struct TableGroup<C> {
    pub name: String,
    pub columns: Vec<ColumnDef>,
    pub rows: Rows<C>,
}

/// Rows of the one table currently being grouped. Iterating past the last
/// row of this table (or dropping this iterator early) does not disturb the
/// shared engine; `TableGroups` drains any leftover rows before the next
/// group is produced.
pub struct Rows<C> {
    engine: Rc<RefCell<PeekableEngine<C>>>,
    ctx: Rc<TableCtx>,
}

impl<C: Iterator<Item = Vec<u8>>> Iterator for Rows<C> {
    type Item = Result<Vec<SqlValue>, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut eng = self.engine.borrow_mut();
        match eng.peek() {
            None => None,
            Some(Err(_)) => Some(Err(eng.take().unwrap().unwrap_err())),
            Some(Ok((ctx, _))) => {
                if !Rc::ptr_eq(ctx, &self.ctx) {
                    return None;
                }
                eng.take().map(|r| r.map(|(_, values)| values))
            }
        }
    }
}

/// Adds a one-item lookahead buffer to `Engine::pull`, since both
/// `TableGroups` and `Rows` need to inspect "what comes next" without
/// necessarily consuming it.
struct PeekableEngine<C> {
    engine: Engine<C>,
    peeked: Option<Option<Result<(Rc<TableCtx>, Vec<SqlValue>), Error>>>,
}

impl<C: Iterator<Item = Vec<u8>>> PeekableEngine<C> {
    fn peek(&mut self) -> &Option<Result<(Rc<TableCtx>, Vec<SqlValue>), Error>> {
        if self.peeked.is_none() {
            self.peeked = Some(self.engine.pull());
        }
        self.peeked.as_ref().unwrap()
    }

    fn take(&mut self) -> Option<Result<(Rc<TableCtx>, Vec<SqlValue>), Error>> {
        match self.peeked.take() {
            Some(item) => item,
            None => self.engine.pull(),
        }
    }
}

/// Iterates whole tables, in the order their rows are encountered in the
/// page stream. Each item's `rows` must be consumed (or let fall out of
/// scope) before calling `next()` again to move to the following table.
pub struct TableGroups<C> {
    engine: Rc<RefCell<PeekableEngine<C>>>,
    current_ctx: Option<Rc<TableCtx>>,
}

impl<C: Iterator<Item = Vec<u8>>> Iterator for TableGroups<C> {
    type Item = Result<TableGroup<C>, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut eng = self.engine.borrow_mut();
        if let Some(prev) = self.current_ctx.take() {
            loop {
                match eng.peek() {
                    Some(Ok((ctx, _))) if Rc::ptr_eq(ctx, &prev) => {
                        eng.take();
                    }
                    _ => break,
                }
            }
        }

        match eng.peek() {
            None => None,
            Some(Err(_)) => Some(Err(eng.take().unwrap().unwrap_err())),
            Some(Ok((ctx, _))) => {
                let ctx = ctx.clone();
                self.current_ctx = Some(ctx.clone());
                drop(eng);
                Some(Ok(TableGroup {
                    name: ctx.name.clone(),
                    columns: ctx.columns.clone(),
                    rows: Rows { engine: self.engine.clone(), ctx },
                }))
            }
        }
    }
}

/// Streams `chunks` (arbitrarily-sized byte slices covering the whole file,
/// in order) and yields one `TableGroup` per user table encountered,
/// each exposing its own lazily-pulled `Rows`. Buffers at most
/// `buffer_size` bytes of not-yet-consumed page data at a time; exceeding it
/// is `Error::BufferExceeded`.
///
/// Construction never fails — header parsing happens on the first pull.
pub fn stream_sqlite<C: Iterator<Item = Vec<u8>>>(chunks: C, buffer_size: usize) -> TableGroups<C> {
    let engine = PeekableEngine { engine: Engine::new(chunks, buffer_size), peeked: None };
    TableGroups { engine: Rc::new(RefCell::new(engine)), current_ctx: None }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_payload_fits_inline_when_small() {
        assert_eq!(local_payload_size(10, 4096), 10);
    }

    #[test]
    fn local_payload_spills_when_large() {
        let size = local_payload_size(10_000, 4096);
        assert!(size < 10_000);
        assert!(size <= 4096 - 35);
    }

    #[test]
    fn btree_leaf_header_parses_cell_pointers() {
        let mut page = vec![0_u8; 4096];
        page[0] = TABLE_LEAF;
        page[1..3].copy_from_slice(&0_u16.to_be_bytes());
        page[3..5].copy_from_slice(&2_u16.to_be_bytes());
        page[5..7].copy_from_slice(&0_u16.to_be_bytes());
        page[7] = 0;
        page[8..10].copy_from_slice(&100_u16.to_be_bytes());
        page[10..12].copy_from_slice(&200_u16.to_be_bytes());

        let hdr = parse_btree_header(&page, 0).unwrap();
        assert_eq!(hdr.page_type, TABLE_LEAF);
        assert_eq!(hdr.cell_pointers, vec![100, 200]);
        assert!(hdr.right_most_pointer.is_none());
    }

    #[test]
    fn btree_interior_header_includes_right_most_pointer() {
        let mut page = vec![0_u8; 4096];
        page[0] = TABLE_INTERIOR;
        page[3..5].copy_from_slice(&1_u16.to_be_bytes());
        page[8..12].copy_from_slice(&99_u32.to_be_bytes());
        page[12..14].copy_from_slice(&50_u16.to_be_bytes());

        let hdr = parse_btree_header(&page, 0).unwrap();
        assert_eq!(hdr.page_type, TABLE_INTERIOR);
        assert_eq!(hdr.cell_pointers, vec![50]);
        assert_eq!(hdr.right_most_pointer, Some(99));
    }

    #[test]
    fn page1_header_start_accounts_for_file_header() {
        assert_eq!(Engine::<std::vec::IntoIter<Vec<u8>>>::header_start(1), 100);
        assert_eq!(Engine::<std::vec::IntoIter<Vec<u8>>>::header_start(2), 0);
    }
}
