/*!

This is the long-form manual for `prize_wheel` and `octoraffle`.

## Input formats

The following formats are supported:
* `csv` semicolon separated text (`.csv` or `.txt` files)
* `xlsx` Excel workbooks

### `csv`

Semicolon separated values, with a header in the first line. The header must contain the
fields `ID` and `Name`, spelled exactly like this. A `Full name` field is optional: it is
used for the rows that leave `Name` empty.

```text
ID;Name;Full name
001;John;John Smith
002;;Jane Doe
003;Bob;
```

Lines ending with `\n`, `\r\n` or `\r` are all accepted, and empty lines are ignored.
A row is dropped when it has fewer fields than the header, when its `ID` is empty, or when
no name can be found for it. The file must contain at least 2 valid participants.

### `xlsx`

Excel workbooks exported from Microsoft Forms, Google Forms, or typed by hand. The first
row is the header. Column names are matched loosely:

| column    | matched by                                             |
|-----------|--------------------------------------------------------|
| id        | the first column named `id`, or containing `id`        |
| name      | the first column named `name`                          |
| full name | the first column containing `full name`, or `fullname` |

Case and surrounding spaces do not matter. The id column and at least one of the name
columns are required. Numbers are read as text (`1.0` becomes `1`).

Participants repeating an id that was already seen are dropped, for both formats.

## The wheel

Every spin draws two numbers. The first one decides how many turns the wheel makes
(between 5 and 10 by default). The second one adds a fraction of a turn, and this fraction
alone decides the winner. The winner is known as soon as the wheel starts spinning: the
animation only shows how the wheel gets there. Every participant has the same chance to
win, whatever its position in the list.

The rotation follows a cubic ease-out curve over the duration of the spin (5 seconds by
default).

## Configuration

`octoraffle` accepts a configuration file in JSON. All the fields are optional and the
command line flags take precedence over them.

```json
{
  "raffleName": "Octocat raffle",
  "participantSource": {
    "filePath": "people.xlsx",
    "provider": "xlsx",
    "excelWorksheetName": "Sheet1"
  },
  "participantCount": 10,
  "spinSettings": {
    "durationMs": 5000,
    "minTurns": 5,
    "extraTurns": 5,
    "frameIntervalMs": 16
  },
  "randomSeed": "42",
  "numberOfDraws": 3
}
```

- `filePath` is relative to the directory of the configuration file.
- `provider` is `csv` or `xlsx`. When absent, it is deduced from the file extension.
- `randomSeed` makes the draws reproducible (string or number).
- `numberOfDraws` stops the raffle after this many winners. By default, the raffle goes on
  as long as at least 2 participants remain.

 */
